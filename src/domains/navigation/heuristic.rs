use super::types::Point;
use crate::common::BoundedCache;
use serde::{Deserialize, Serialize};

pub fn manhattan(a: Point, b: Point) -> u32 {
    (b.x - a.x).unsigned_abs() + (b.y - a.y).unsigned_abs()
}

pub fn chebyshev(a: Point, b: Point) -> u32 {
    (b.x - a.x).unsigned_abs().max((b.y - a.y).unsigned_abs())
}

/// Distance metric used to guide the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    /// Never overestimates on the eight-connected grid, where a diagonal step
    /// costs the same as an orthogonal one.
    #[default]
    Chebyshev,
    /// Overestimates diagonal travel; faster on open maps but the returned
    /// route is no longer guaranteed to be the cheapest.
    Manhattan,
}

/// Distance estimate between two points, memoised per point pair.
#[derive(Debug, Clone)]
pub struct Heuristic {
    kind: HeuristicKind,
    min_step_cost: u32,
    cache: BoundedCache<(Point, Point), u32>,
}

impl Heuristic {
    /// `min_step_cost` scales the distance so the estimate stays a lower
    /// bound when the cheapest terrain costs more than one.
    pub fn new(kind: HeuristicKind, min_step_cost: u32, capacity: usize) -> Self {
        Self {
            kind,
            min_step_cost,
            cache: BoundedCache::new(capacity),
        }
    }

    pub fn kind(&self) -> HeuristicKind {
        self.kind
    }

    pub fn estimate(&mut self, a: Point, b: Point) -> u32 {
        if let Some(h) = self.cache.get(&(a, b)) {
            return h;
        }
        let distance = match self.kind {
            HeuristicKind::Chebyshev => chebyshev(a, b),
            HeuristicKind::Manhattan => manhattan(a, b),
        };
        let h = distance.saturating_mul(self.min_step_cost);
        self.cache.insert((a, b), h);
        h
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::new(HeuristicKind::default(), 1, 50)
    }
}
