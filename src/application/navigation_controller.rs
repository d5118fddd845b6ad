use super::poller::{Poller, StopHandle, WaitOutcome};
use super::route_planner::RoutePlanner;
use crate::common::NavResult;
use crate::config::{Config, MotionConfig};
use crate::domains::logger::DynLogger;
use crate::domains::navigation::{
    bearing, ActuationPort, AgentStatePort, CombatPort, CostField, MapSegment, MapSequencePort,
    NavState, NavigationEvent, Point, VisionPort,
};
use chrono::Utc;
use std::sync::Arc;

/// External collaborators the controller drives. Injected, never global.
#[derive(Clone)]
pub struct NavigationContext {
    pub vision: Arc<dyn VisionPort>,
    pub agent: Arc<dyn AgentStatePort>,
    pub actuation: Arc<dyn ActuationPort>,
    pub combat: Arc<dyn CombatPort>,
    pub maps: Arc<dyn MapSequencePort>,
    pub logger: DynLogger,
}

impl NavigationContext {
    /// The agent must not plan or move while either flag is up.
    pub fn combat_active(&self) -> bool {
        self.combat.is_fighting() || self.agent.is_firing()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub segments_completed: usize,
    pub targets_reached: usize,
    pub targets_abandoned: usize,
    pub stopped_by_request: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetOutcome {
    Reached,
    Abandoned,
    Cancelled,
}

/// Drives the agent through every target of every remaining map segment.
pub struct NavigationController {
    ctx: NavigationContext,
    motion: MotionConfig,
    planner: RoutePlanner,
    poller: Poller,
    stop: StopHandle,
    state: NavState,
    uncommitted_events: Vec<NavigationEvent>,
}

impl NavigationController {
    pub fn new(ctx: NavigationContext, config: &Config) -> Self {
        let stop = StopHandle::new();
        let poller = Poller::new(
            config.motion.poll_interval(),
            config.motion.combat_wait_timeout(),
            stop.clone(),
        );
        Self {
            ctx,
            motion: config.motion.clone(),
            planner: RoutePlanner::new(config),
            poller,
            stop,
            state: NavState::Idle,
            uncommitted_events: Vec::new(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn uncommitted_events(&self) -> &[NavigationEvent] {
        &self.uncommitted_events
    }

    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    /// Run map cycles until the sequencer runs dry or a stop is requested.
    ///
    /// Whatever happens, the combat subsystem is closed before returning.
    pub async fn run(&mut self) -> NavResult<RunSummary> {
        let mut summary = RunSummary::default();
        match self.run_segments(&mut summary).await {
            Ok(()) => {
                summary.stopped_by_request = self.stop.is_stop_requested();
                let reason = if summary.stopped_by_request {
                    "stop requested"
                } else {
                    "all map segments explored"
                };
                self.ctx.logger.info(&format!("Navigation finished: {}", reason));
                let closed = self.ctx.combat.close();
                self.finish(reason.to_string());
                closed.map(|_| summary)
            }
            Err(e) => {
                self.ctx.logger.error(&format!("Navigation aborted: {}", e));
                if let Err(stop_err) = self.ctx.actuation.stop_move() {
                    tracing::warn!("stop_move during abort failed: {}", stop_err);
                }
                if let Err(close_err) = self.ctx.combat.close() {
                    tracing::warn!("Closing combat during abort failed: {}", close_err);
                }
                self.finish(e.to_string());
                Err(e)
            }
        }
    }

    async fn run_segments(&mut self, summary: &mut RunSummary) -> NavResult<()> {
        while self.ctx.maps.has_next() && !self.stop.is_stop_requested() {
            let segment = self.ctx.maps.advance()?;
            self.ctx.maps.wait_until_ready(&segment)?;
            if self.run_segment(&segment, summary).await? {
                summary.segments_completed += 1;
            }
        }
        Ok(())
    }

    /// Returns false when the segment was cut short by a stop request.
    async fn run_segment(&mut self, segment: &MapSegment, summary: &mut RunSummary) -> NavResult<bool> {
        self.transition(NavState::Planning);
        self.planner.invalidate();

        let image = self.ctx.vision.classified_map(segment)?;
        let targets = self.planner.extract_targets(&image);
        let field = self.planner.build_field(image);
        self.ctx.logger.info(&format!(
            "Segment {}: {} targets after dedupe",
            segment.name,
            targets.len()
        ));
        self.record(NavigationEvent::SegmentLoaded {
            segment: segment.name.clone(),
            target_count: targets.len(),
            timestamp: Utc::now(),
        });

        let origin = self.ctx.vision.locate_agent(segment)?;
        let ordered = self.planner.order_targets(&field, origin, &targets)?;
        self.ctx
            .logger
            .info(&format!("Targets ordered from {}: {:?}", origin, ordered));
        self.record(NavigationEvent::TargetsOrdered {
            segment: segment.name.clone(),
            targets: ordered.clone(),
            timestamp: Utc::now(),
        });

        self.ctx.combat.start()?;
        let mut completed = true;
        for target in ordered {
            if self.stop.is_stop_requested() {
                completed = false;
                break;
            }
            match self.navigate_to(segment, &field, target).await? {
                TargetOutcome::Reached => summary.targets_reached += 1,
                TargetOutcome::Abandoned => summary.targets_abandoned += 1,
                TargetOutcome::Cancelled => {
                    completed = false;
                    break;
                }
            }
        }
        self.ctx.combat.stop()?;

        if completed {
            self.record(NavigationEvent::SegmentCompleted {
                segment: segment.name.clone(),
                timestamp: Utc::now(),
            });
        }
        Ok(completed)
    }

    async fn navigate_to(
        &mut self,
        segment: &MapSegment,
        field: &CostField,
        target: Point,
    ) -> NavResult<TargetOutcome> {
        self.transition(NavState::Planning);
        let Some(waypoints) = self.plan_route(segment, field, target).await? else {
            return Ok(TargetOutcome::Cancelled);
        };
        let Some(&first) = waypoints.first() else {
            return Ok(self.abandon(target, "route reduced to no waypoints"));
        };

        self.transition(NavState::Orienting);
        let position = self.ctx.vision.locate_agent(segment)?;
        let heading = self.ctx.vision.current_heading()?;
        self.ctx.actuation.set_heading(heading, bearing(position, first))?;

        self.transition(NavState::Moving);
        self.ctx.actuation.start_move()?;
        let outcome = self.follow_route(segment, &waypoints).await?;
        self.ctx.actuation.stop_move()?;

        Ok(match outcome {
            TargetOutcome::Reached => {
                self.transition(NavState::Arrived);
                self.record(NavigationEvent::TargetReached {
                    target,
                    timestamp: Utc::now(),
                });
                TargetOutcome::Reached
            }
            TargetOutcome::Abandoned => self.abandon(
                target,
                &format!(
                    "still stalled after {} obstacle recoveries",
                    self.motion.max_recoveries_per_waypoint
                ),
            ),
            TargetOutcome::Cancelled => TargetOutcome::Cancelled,
        })
    }

    /// Plan once; on `RouteNotFound` wait for the fight to end and plan once
    /// more from wherever the agent now stands. A second failure is returned.
    async fn plan_route(
        &mut self,
        segment: &MapSegment,
        field: &CostField,
        target: Point,
    ) -> NavResult<Option<Vec<Point>>> {
        if self.wait_for_combat("combat to end before planning").await? == WaitOutcome::Cancelled {
            return Ok(None);
        }

        let start = self.ctx.vision.locate_agent(segment)?;
        let waypoints = match self.planner.plan_waypoints(field, start, target) {
            Ok(waypoints) => waypoints,
            Err(e) if e.is_recoverable() => {
                self.ctx
                    .logger
                    .warn(&format!("{}; retrying once the fight is over", e));
                self.record(NavigationEvent::RouteRetried {
                    target,
                    reason: e.to_string(),
                    timestamp: Utc::now(),
                });
                let combat = self.ctx.combat.clone();
                let outcome = self
                    .poller
                    .wait_while("fight to end before replanning", || combat.is_fighting())
                    .await?;
                if outcome == WaitOutcome::Cancelled {
                    return Ok(None);
                }
                let start = self.ctx.vision.locate_agent(segment)?;
                self.planner.plan_waypoints(field, start, target)?
            }
            Err(e) => return Err(e),
        };

        self.ctx.logger.info(&format!(
            "Route to {} planned with {} waypoints",
            target,
            waypoints.len()
        ));
        self.record(NavigationEvent::RoutePlanned {
            target,
            waypoints: waypoints.clone(),
            timestamp: Utc::now(),
        });
        Ok(Some(waypoints))
    }

    async fn follow_route(
        &mut self,
        segment: &MapSegment,
        waypoints: &[Point],
    ) -> NavResult<TargetOutcome> {
        let mut index = 0;
        let mut last_sample: Option<Point> = None;
        let mut recoveries = 0u32;

        while index < waypoints.len() {
            if self.stop.is_stop_requested() {
                return Ok(TargetOutcome::Cancelled);
            }

            if self.ctx.combat_active() {
                self.ctx.actuation.stop_move()?;
                self.transition(NavState::Paused);
                self.record(NavigationEvent::CombatPaused {
                    position: last_sample,
                    timestamp: Utc::now(),
                });
                if self.wait_for_combat("combat to end").await? == WaitOutcome::Cancelled {
                    return Ok(TargetOutcome::Cancelled);
                }
                self.record(NavigationEvent::CombatResumed {
                    timestamp: Utc::now(),
                });
                self.transition(NavState::Moving);
                self.ctx.actuation.start_move()?;
                // Standing still during the fight is not a stall.
                last_sample = None;
            }

            let waypoint = waypoints[index];
            let position = self.ctx.vision.locate_agent(segment)?;
            let heading = self.ctx.vision.current_heading()?;

            if position.is_near(&waypoint, self.motion.arrival_tolerance) {
                index += 1;
                recoveries = 0;
                let remaining = waypoints.len() - index;
                self.ctx.logger.info(&format!(
                    "Reached waypoint {}, {} remaining",
                    waypoint, remaining
                ));
                self.record(NavigationEvent::WaypointReached {
                    waypoint,
                    remaining,
                    timestamp: Utc::now(),
                });
                if remaining == 0 {
                    self.ctx.actuation.fire()?;
                }
                last_sample = Some(position);
                continue;
            }

            if last_sample == Some(position) {
                if recoveries >= self.motion.max_recoveries_per_waypoint {
                    return Ok(TargetOutcome::Abandoned);
                }
                recoveries += 1;
                self.transition(NavState::Recovering);
                self.ctx.logger.info(&format!(
                    "No progress at {}, trying to get around an obstacle",
                    position
                ));
                self.ctx.actuation.stop_move()?;
                self.ctx.actuation.avoid_obstacle()?;
                self.ctx.actuation.start_move()?;
                self.record(NavigationEvent::StallRecovered {
                    position,
                    waypoint,
                    timestamp: Utc::now(),
                });
                self.transition(NavState::Moving);
            } else {
                self.ctx
                    .actuation
                    .set_heading(heading, bearing(position, waypoint))?;
            }

            last_sample = Some(position);
            self.poller.pause(self.motion.track_interval()).await;
        }

        Ok(TargetOutcome::Reached)
    }

    async fn wait_for_combat(&self, what: &str) -> NavResult<WaitOutcome> {
        let ctx = self.ctx.clone();
        self.poller.wait_while(what, move || ctx.combat_active()).await
    }

    fn abandon(&mut self, target: Point, reason: &str) -> TargetOutcome {
        self.ctx
            .logger
            .warn(&format!("Giving up on target {}: {}", target, reason));
        self.record(NavigationEvent::TargetAbandoned {
            target,
            reason: reason.to_string(),
            timestamp: Utc::now(),
        });
        TargetOutcome::Abandoned
    }

    fn finish(&mut self, reason: String) {
        self.transition(NavState::Stopped);
        self.record(NavigationEvent::Stopped {
            reason,
            timestamp: Utc::now(),
        });
    }

    fn transition(&mut self, next: NavState) {
        if self.state != next {
            tracing::debug!("Navigation state {} -> {}", self.state, next);
            self.state = next;
        }
    }

    fn record(&mut self, event: NavigationEvent) {
        self.uncommitted_events.push(event);
    }
}
