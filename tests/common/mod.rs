#![allow(dead_code)]

use image::RgbImage;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use waymark::application::{NavigationContext, StopHandle};
use waymark::domains::navigation::*;
use waymark::{DomainLogger, NavError, NavResult};

pub const WALL: image::Rgb<u8> = image::Rgb([255, 255, 255]);
pub const MARKER: image::Rgb<u8> = image::Rgb([214, 46, 46]);
pub const FLOOR: image::Rgb<u8> = image::Rgb([40, 40, 40]);

pub fn open_map(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, FLOOR)
}

/// One-pixel square ring of wall at Chebyshev distance `radius` from `center`.
pub fn draw_ring(img: &mut RgbImage, center: Point, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx.abs().max(dy.abs()) == radius {
                img.put_pixel((center.x + dx) as u32, (center.y + dy) as u32, WALL);
            }
        }
    }
}

pub fn mark(img: &mut RgbImage, p: Point) {
    img.put_pixel(p.x as u32, p.y as u32, MARKER);
}

/// Every command the controller issued, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    StartMove,
    StopMove,
    SetHeading(f64),
    AvoidObstacle,
    Fire,
    CombatStart,
    CombatStop,
    CombatClose,
}

struct GameState {
    x: f64,
    y: f64,
    heading: f64,
    moving: bool,
    speed: f64,
    scripted: VecDeque<Point>,
    segments: VecDeque<(MapSegment, RgbImage)>,
    maps: Vec<(String, RgbImage)>,
    /// Invisible obstacle: the agent cannot step onto x >= barrier.
    barrier: Option<i32>,
    avoid_clears_barrier: bool,
    /// Start a fight of `polls` combat checks once the agent reaches x >= threshold.
    fight_trigger: Option<(i32, u32)>,
    fight_remaining: u32,
    firing_remaining: u32,
    stop_after_locates: Option<(usize, StopHandle)>,
    locate_calls: usize,
    commands: Vec<Command>,
    fail_vision: bool,
}

/// Simulated game world implementing every navigation port.
///
/// While moving, each position query advances the agent `speed` pixels along
/// its current heading, so tests never depend on exact call counts.
#[derive(Clone)]
pub struct FakeGame {
    state: Arc<Mutex<GameState>>,
}

impl FakeGame {
    pub fn new(start: Point) -> Self {
        Self {
            state: Arc::new(Mutex::new(GameState {
                x: f64::from(start.x),
                y: f64::from(start.y),
                heading: 0.0,
                moving: false,
                speed: 3.0,
                scripted: VecDeque::new(),
                segments: VecDeque::new(),
                maps: Vec::new(),
                barrier: None,
                avoid_clears_barrier: true,
                fight_trigger: None,
                fight_remaining: 0,
                firing_remaining: 0,
                stop_after_locates: None,
                locate_calls: 0,
                commands: Vec::new(),
                fail_vision: false,
            })),
        }
    }

    pub fn with_segment(self, name: &str, image: RgbImage) -> Self {
        {
            let mut s = self.state.lock().unwrap();
            let segment = MapSegment {
                name: name.to_string(),
                line: s.segments.len() as u32 + 1,
            };
            s.maps.push((name.to_string(), image.clone()));
            s.segments.push_back((segment, image));
        }
        self
    }

    /// Positions returned, in order, before the simulation takes over.
    pub fn script_positions(&self, points: &[Point]) {
        self.state.lock().unwrap().scripted.extend(points.iter().copied());
    }

    pub fn set_barrier(&self, x: i32, clears_on_avoid: bool) {
        let mut s = self.state.lock().unwrap();
        s.barrier = Some(x);
        s.avoid_clears_barrier = clears_on_avoid;
    }

    pub fn fight_when_reaching(&self, x: i32, polls: u32) {
        self.state.lock().unwrap().fight_trigger = Some((x, polls));
    }

    pub fn fight_for(&self, polls: u32) {
        self.state.lock().unwrap().fight_remaining = polls;
    }

    pub fn fire_for(&self, polls: u32) {
        self.state.lock().unwrap().firing_remaining = polls;
    }

    pub fn stop_after_locates(&self, calls: usize, handle: StopHandle) {
        self.state.lock().unwrap().stop_after_locates = Some((calls, handle));
    }

    pub fn fail_vision(&self) {
        self.state.lock().unwrap().fail_vision = true;
    }

    pub fn commands(&self) -> Vec<Command> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn count(&self, command: &Command) -> usize {
        self.commands().iter().filter(|c| *c == command).count()
    }

    pub fn position(&self) -> Point {
        let s = self.state.lock().unwrap();
        Point::new(s.x.round() as i32, s.y.round() as i32)
    }

    pub fn context(&self, logger: waymark::DynLogger) -> NavigationContext {
        let game = Arc::new(self.clone());
        NavigationContext {
            vision: game.clone(),
            agent: game.clone(),
            actuation: game.clone(),
            combat: game.clone(),
            maps: game,
            logger,
        }
    }

    fn push(&self, command: Command) {
        self.state.lock().unwrap().commands.push(command);
    }
}

impl GameState {
    fn step(&mut self) {
        if !self.moving {
            return;
        }
        let rad = self.heading.to_radians();
        let nx = self.x - self.speed * rad.sin();
        let ny = self.y - self.speed * rad.cos();
        if let Some(barrier) = self.barrier {
            if nx.round() as i32 >= barrier {
                return;
            }
        }
        self.x = nx;
        self.y = ny;
        if let Some((threshold, polls)) = self.fight_trigger {
            if self.x.round() as i32 >= threshold {
                self.fight_trigger = None;
                self.fight_remaining = polls;
            }
        }
    }
}

impl VisionPort for FakeGame {
    fn classified_map(&self, segment: &MapSegment) -> NavResult<RgbImage> {
        let s = self.state.lock().unwrap();
        s.maps
            .iter()
            .find(|(name, _)| *name == segment.name)
            .map(|(_, img)| img.clone())
            .ok_or_else(|| NavError::Vision(format!("no map for {}", segment.name)))
    }

    fn locate_agent(&self, _segment: &MapSegment) -> NavResult<Point> {
        let mut s = self.state.lock().unwrap();
        if s.fail_vision {
            return Err(NavError::Vision("agent marker not found".to_string()));
        }
        s.locate_calls += 1;
        if let Some((limit, handle)) = &s.stop_after_locates {
            if s.locate_calls >= *limit {
                handle.request_stop();
            }
        }
        if let Some(p) = s.scripted.pop_front() {
            s.x = f64::from(p.x);
            s.y = f64::from(p.y);
            return Ok(p);
        }
        s.step();
        Ok(Point::new(s.x.round() as i32, s.y.round() as i32))
    }

    fn current_heading(&self) -> NavResult<f64> {
        Ok(self.state.lock().unwrap().heading)
    }
}

impl AgentStatePort for FakeGame {
    fn is_firing(&self) -> bool {
        let mut s = self.state.lock().unwrap();
        if s.firing_remaining > 0 {
            s.firing_remaining -= 1;
            true
        } else {
            false
        }
    }
}

impl ActuationPort for FakeGame {
    fn start_move(&self) -> NavResult<()> {
        let mut s = self.state.lock().unwrap();
        s.moving = true;
        s.commands.push(Command::StartMove);
        Ok(())
    }

    fn stop_move(&self) -> NavResult<()> {
        let mut s = self.state.lock().unwrap();
        s.moving = false;
        s.commands.push(Command::StopMove);
        Ok(())
    }

    fn set_heading(&self, _current: f64, target: f64) -> NavResult<()> {
        let mut s = self.state.lock().unwrap();
        s.heading = target;
        s.commands.push(Command::SetHeading(target));
        Ok(())
    }

    fn avoid_obstacle(&self) -> NavResult<()> {
        let mut s = self.state.lock().unwrap();
        if s.avoid_clears_barrier {
            s.barrier = None;
        }
        s.commands.push(Command::AvoidObstacle);
        Ok(())
    }

    fn fire(&self) -> NavResult<()> {
        self.push(Command::Fire);
        Ok(())
    }
}

impl CombatPort for FakeGame {
    fn start(&self) -> NavResult<()> {
        self.push(Command::CombatStart);
        Ok(())
    }

    fn stop(&self) -> NavResult<()> {
        self.push(Command::CombatStop);
        Ok(())
    }

    fn close(&self) -> NavResult<()> {
        self.push(Command::CombatClose);
        Ok(())
    }

    fn is_fighting(&self) -> bool {
        let mut s = self.state.lock().unwrap();
        if s.fight_remaining > 0 {
            s.fight_remaining -= 1;
            true
        } else {
            false
        }
    }
}

impl MapSequencePort for FakeGame {
    fn has_next(&self) -> bool {
        !self.state.lock().unwrap().segments.is_empty()
    }

    fn advance(&self) -> NavResult<MapSegment> {
        self.state
            .lock()
            .unwrap()
            .segments
            .pop_front()
            .map(|(segment, _)| segment)
            .ok_or_else(|| NavError::MapSequence("no segments left".to_string()))
    }

    fn wait_until_ready(&self, _segment: &MapSegment) -> NavResult<()> {
        Ok(())
    }
}

/// Logger capturing messages for assertions.
#[derive(Default)]
pub struct CaptureLogger {
    pub messages: Mutex<Vec<String>>,
}

impl DomainLogger for CaptureLogger {
    fn info(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("INFO:{}", msg));
    }
    fn warn(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("WARN:{}", msg));
    }
    fn error(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("ERR:{}", msg));
    }
}
