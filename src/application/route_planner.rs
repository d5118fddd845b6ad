use crate::common::NavResult;
use crate::config::{Config, MapConfig, RouteConfig};
use crate::domains::navigation::{
    dedupe_points, extract_targets, order_targets, simplify_route, CostField, Heuristic,
    PathSearch, Point, SearchOutcome,
};
use image::RgbImage;
use std::sync::Arc;

/// Planning front end shared by the controller and the CLI.
///
/// Owns the memoised search, so repeated queries against the same map content
/// are answered from cache until [`RoutePlanner::invalidate`] is called.
pub struct RoutePlanner {
    search: PathSearch,
    map: MapConfig,
    route: RouteConfig,
}

impl RoutePlanner {
    pub fn new(config: &Config) -> Self {
        let heuristic = Heuristic::new(
            config.search.heuristic,
            config.map.open_cost,
            config.search.heuristic_cache_capacity,
        );
        Self {
            search: PathSearch::new(heuristic, config.search.path_cache_capacity),
            map: config.map.clone(),
            route: config.route.clone(),
        }
    }

    pub fn build_field(&self, image: RgbImage) -> CostField {
        CostField::new(image, self.map.terrain_costs())
    }

    pub fn extract_targets(&self, image: &RgbImage) -> Vec<Point> {
        extract_targets(image, self.map.target_color, self.map.target_separation)
    }

    pub fn order_targets(
        &mut self,
        field: &CostField,
        origin: Point,
        targets: &[Point],
    ) -> NavResult<Vec<Point>> {
        order_targets(&mut self.search, field, origin, targets)
    }

    pub fn shortest_path(
        &mut self,
        field: &CostField,
        start: Point,
        goal: Point,
    ) -> NavResult<Arc<SearchOutcome>> {
        self.search.find(field, start, goal)
    }

    /// Search, reduce to heading changes, and drop waypoints that crowd an
    /// earlier one.
    pub fn plan_waypoints(
        &mut self,
        field: &CostField,
        start: Point,
        goal: Point,
    ) -> NavResult<Vec<Point>> {
        let outcome = self.search.find(field, start, goal)?;
        let reduced = simplify_route(&outcome.path, self.route.bearing_tolerance_deg);
        Ok(dedupe_points(&reduced, self.route.waypoint_separation))
    }

    pub fn invalidate(&mut self) {
        self.search.invalidate();
    }

    pub fn cached_searches(&self) -> usize {
        self.search.cached_len()
    }
}
