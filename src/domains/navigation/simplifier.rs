use super::bearing::{angular_difference, bearing};
use super::types::Point;

/// Collapse a dense cell path into the points where its heading changes.
///
/// A running segment starts at the first point. Each following point whose
/// bearing from the segment start stays within `tolerance_deg` of the
/// segment's bearing extends the segment. A point outside the window closes
/// the segment at the previous point, which is emitted and becomes the next
/// segment start. The final point is emitted only if the last segment was
/// still straight when the walk ended.
pub fn simplify_route(path: &[Point], tolerance_deg: f64) -> Vec<Point> {
    if path.len() < 2 {
        return path.to_vec();
    }

    let mut waypoints = Vec::new();
    let mut start = path[0];
    let mut previous = path[1];
    let mut heading = bearing(start, previous);
    let mut straight = true;

    for &current in &path[2..] {
        let cur = bearing(start, current);
        if angular_difference(cur, heading) <= tolerance_deg {
            straight = true;
        } else {
            straight = false;
            waypoints.push(previous);
            start = previous;
            heading = bearing(start, current);
        }
        previous = current;
    }

    if straight {
        waypoints.push(previous);
    }
    waypoints
}

/// Drop every point within `radius` of a point already kept. The first
/// occurrence wins, so scan order decides which duplicate survives.
pub fn dedupe_points(points: &[Point], radius: f64) -> Vec<Point> {
    let mut kept: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if !kept.iter().any(|k| k.is_near(p, radius)) {
            kept.push(*p);
        }
    }
    kept
}
