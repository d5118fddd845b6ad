use super::types::Point;
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NavigationEvent {
    SegmentLoaded {
        segment: String,
        target_count: usize,
        timestamp: DateTime<Utc>,
    },
    TargetsOrdered {
        segment: String,
        targets: Vec<Point>,
        timestamp: DateTime<Utc>,
    },
    RoutePlanned {
        target: Point,
        waypoints: Vec<Point>,
        timestamp: DateTime<Utc>,
    },
    RouteRetried {
        target: Point,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    CombatPaused {
        position: Option<Point>,
        timestamp: DateTime<Utc>,
    },
    CombatResumed {
        timestamp: DateTime<Utc>,
    },
    WaypointReached {
        waypoint: Point,
        remaining: usize,
        timestamp: DateTime<Utc>,
    },
    StallRecovered {
        position: Point,
        waypoint: Point,
        timestamp: DateTime<Utc>,
    },
    TargetReached {
        target: Point,
        timestamp: DateTime<Utc>,
    },
    TargetAbandoned {
        target: Point,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    SegmentCompleted {
        segment: String,
        timestamp: DateTime<Utc>,
    },
    Stopped {
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for NavigationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            NavigationEvent::SegmentLoaded { .. } => "SegmentLoaded",
            NavigationEvent::TargetsOrdered { .. } => "TargetsOrdered",
            NavigationEvent::RoutePlanned { .. } => "RoutePlanned",
            NavigationEvent::RouteRetried { .. } => "RouteRetried",
            NavigationEvent::CombatPaused { .. } => "CombatPaused",
            NavigationEvent::CombatResumed { .. } => "CombatResumed",
            NavigationEvent::WaypointReached { .. } => "WaypointReached",
            NavigationEvent::StallRecovered { .. } => "StallRecovered",
            NavigationEvent::TargetReached { .. } => "TargetReached",
            NavigationEvent::TargetAbandoned { .. } => "TargetAbandoned",
            NavigationEvent::SegmentCompleted { .. } => "SegmentCompleted",
            NavigationEvent::Stopped { .. } => "Stopped",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            NavigationEvent::SegmentLoaded { timestamp, .. } => *timestamp,
            NavigationEvent::TargetsOrdered { timestamp, .. } => *timestamp,
            NavigationEvent::RoutePlanned { timestamp, .. } => *timestamp,
            NavigationEvent::RouteRetried { timestamp, .. } => *timestamp,
            NavigationEvent::CombatPaused { timestamp, .. } => *timestamp,
            NavigationEvent::CombatResumed { timestamp } => *timestamp,
            NavigationEvent::WaypointReached { timestamp, .. } => *timestamp,
            NavigationEvent::StallRecovered { timestamp, .. } => *timestamp,
            NavigationEvent::TargetReached { timestamp, .. } => *timestamp,
            NavigationEvent::TargetAbandoned { timestamp, .. } => *timestamp,
            NavigationEvent::SegmentCompleted { timestamp, .. } => *timestamp,
            NavigationEvent::Stopped { timestamp, .. } => *timestamp,
        }
    }
}
