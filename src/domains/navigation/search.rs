use super::cost_field::CostField;
use super::heuristic::Heuristic;
use super::types::{CostMap, Path, Point};
use crate::common::{BoundedCache, NavError, NavResult};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub path: Path,
    /// Cost-so-far of every point the search reached, start included at 0.
    pub costs: CostMap,
}

impl SearchOutcome {
    pub fn goal(&self) -> Point {
        // A successful search always contains at least the start.
        self.path[self.path.len() - 1]
    }

    pub fn total_cost(&self) -> u32 {
        self.costs.get(&self.goal()).copied().unwrap_or(0)
    }

    pub fn cost_to(&self, p: Point) -> Option<u32> {
        self.costs.get(&p).copied()
    }
}

/// A* from `start` to `goal` over `field`.
///
/// The frontier is ordered by `f = g + h`, ties broken by the point's
/// `(x, y)` order, so the same inputs always expand in the same order.
pub fn a_star(
    field: &CostField,
    start: Point,
    goal: Point,
    heuristic: &mut Heuristic,
) -> NavResult<SearchOutcome> {
    field.check_bounds(start)?;
    field.check_bounds(goal)?;

    let mut frontier = BinaryHeap::new();
    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut cost_so_far: CostMap = HashMap::new();
    cost_so_far.insert(start, 0);
    frontier.push(Reverse((heuristic.estimate(start, goal), start, 0u32)));

    if start != goal && !field.walkable(goal) {
        tracing::debug!("Goal {} is not walkable", goal);
        return Err(NavError::RouteNotFound { start, goal });
    }

    let mut expanded = 0usize;
    while let Some(Reverse((_, current, g))) = frontier.pop() {
        if g > cost_so_far.get(&current).copied().unwrap_or(u32::MAX) {
            continue;
        }
        if current == goal {
            let path = reconstruct(&came_from, start, goal);
            tracing::debug!(
                "A* {} -> {}: {} steps, cost {}, {} expansions",
                start,
                goal,
                path.len().saturating_sub(1),
                g,
                expanded
            );
            return Ok(SearchOutcome {
                path,
                costs: cost_so_far,
            });
        }
        expanded += 1;

        for next in field.neighbors(current) {
            let new_cost = g + field.cost(next);
            let known = cost_so_far.get(&next).copied();
            if known.map_or(true, |c| new_cost < c) {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current);
                let priority = new_cost + heuristic.estimate(next, goal);
                frontier.push(Reverse((priority, next, new_cost)));
            }
        }
    }

    tracing::debug!("A* exhausted the frontier after {} expansions, start={}", expanded, start);
    Err(NavError::RouteNotFound { start, goal })
}

fn reconstruct(came_from: &HashMap<Point, Point>, start: Point, goal: Point) -> Path {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(prev) => {
                current = *prev;
                path.push(current);
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SearchKey {
    fingerprint: [u8; 16],
    start: Point,
    goal: Point,
}

/// Memoising front end for [`a_star`].
///
/// Results are keyed by the cost field's content fingerprint plus the
/// endpoints. Failures are not cached: the agent will have moved by the time
/// a retry happens.
#[derive(Debug, Clone)]
pub struct PathSearch {
    heuristic: Heuristic,
    cache: BoundedCache<SearchKey, Arc<SearchOutcome>>,
}

impl PathSearch {
    pub fn new(heuristic: Heuristic, capacity: usize) -> Self {
        Self {
            heuristic,
            cache: BoundedCache::new(capacity),
        }
    }

    pub fn find(
        &mut self,
        field: &CostField,
        start: Point,
        goal: Point,
    ) -> NavResult<Arc<SearchOutcome>> {
        let key = SearchKey {
            fingerprint: field.fingerprint(),
            start,
            goal,
        };
        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!("Search cache hit {} -> {}", start, goal);
            return Ok(hit);
        }
        let outcome = Arc::new(a_star(field, start, goal, &mut self.heuristic)?);
        self.cache.insert(key, outcome.clone());
        Ok(outcome)
    }

    pub fn is_cached(&self, field: &CostField, start: Point, goal: Point) -> bool {
        self.cache.contains(&SearchKey {
            fingerprint: field.fingerprint(),
            start,
            goal,
        })
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}

impl Default for PathSearch {
    fn default() -> Self {
        Self::new(Heuristic::default(), 50)
    }
}
