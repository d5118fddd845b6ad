use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer pixel coordinate on a classified map image. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }

    /// True when `other` lies within `tolerance` pixels (Euclidean) of `self`.
    pub fn is_near(&self, other: &Point, tolerance: f64) -> bool {
        self.distance(other) <= tolerance
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ordered cell path from start to goal, both inclusive.
pub type Path = Vec<Point>;

/// Cumulative cost of every point the search settled or touched.
pub type CostMap = std::collections::HashMap<Point, u32>;

/// Exact RGB triple shared with the vision service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const MARKER_RED: Rgb = Rgb([214, 46, 46]);

    pub fn matches(&self, pixel: &image::Rgb<u8>) -> bool {
        self.0 == pixel.0
    }
}

/// A map segment handed out by the map sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSegment {
    pub name: String,
    /// Route line the vision service uses to localise the agent on this segment.
    pub line: u32,
}

/// States of the navigation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavState {
    Idle,
    Planning,
    Orienting,
    Moving,
    Paused,
    Recovering,
    Arrived,
    Stopped,
}

impl fmt::Display for NavState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NavState::Idle => "idle",
            NavState::Planning => "planning",
            NavState::Orienting => "orienting",
            NavState::Moving => "moving",
            NavState::Paused => "paused",
            NavState::Recovering => "recovering",
            NavState::Arrived => "arrived",
            NavState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
