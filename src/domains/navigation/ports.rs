use super::types::{MapSegment, Point};
use crate::common::NavResult;
use image::RgbImage;

/// Port to the vision subsystem: classified maps and the agent's pose.
pub trait VisionPort: Send + Sync {
    /// Classified image of `segment`: wall pixels and objective markers in the
    /// agreed exact colors.
    fn classified_map(&self, segment: &MapSegment) -> NavResult<RgbImage>;
    fn locate_agent(&self, segment: &MapSegment) -> NavResult<Point>;
    /// Current heading in degrees, same convention as [`super::bearing::bearing`].
    fn current_heading(&self) -> NavResult<f64>;
}

/// Port exposing the agent's own action state.
pub trait AgentStatePort: Send + Sync {
    fn is_firing(&self) -> bool;
}

/// Port to the movement primitives of the agent.
pub trait ActuationPort: Send + Sync {
    fn start_move(&self) -> NavResult<()>;
    fn stop_move(&self) -> NavResult<()>;
    fn set_heading(&self, current: f64, target: f64) -> NavResult<()>;
    /// Side-step maneuver used when the agent is wedged against something.
    fn avoid_obstacle(&self) -> NavResult<()>;
    fn fire(&self) -> NavResult<()>;
}

/// Port to the combat subsystem.
pub trait CombatPort: Send + Sync {
    fn start(&self) -> NavResult<()>;
    fn stop(&self) -> NavResult<()>;
    fn close(&self) -> NavResult<()>;
    fn is_fighting(&self) -> bool;
}

/// Port to the map sequencer that walks through the map segments to explore.
pub trait MapSequencePort: Send + Sync {
    fn has_next(&self) -> bool;
    fn advance(&self) -> NavResult<MapSegment>;
    /// Block until the game shows the newly loaded segment as ready.
    fn wait_until_ready(&self, segment: &MapSegment) -> NavResult<()>;
}
