use crate::domains::navigation::types::Point;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("No route from {start} to {goal}")]
    RouteNotFound { start: Point, goal: Point },

    #[error("Point {point} is outside the {width}x{height} map")]
    OutOfBounds { point: Point, width: u32, height: u32 },

    #[error("Vision error: {0}")]
    Vision(String),

    #[error("Actuation error: {0}")]
    Actuation(String),

    #[error("Combat error: {0}")]
    Combat(String),

    #[error("Map sequence error: {0}")]
    MapSequence(String),

    #[error("Gave up waiting for {condition} after {waited_ms} ms")]
    WaitTimedOut { condition: String, waited_ms: u64 },

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

impl NavError {
    /// Only a failed search is worth retrying; everything else is surfaced as-is.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NavError::RouteNotFound { .. })
    }
}

pub type NavResult<T> = Result<T, NavError>;
