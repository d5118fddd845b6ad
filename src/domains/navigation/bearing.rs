//! Compass bearings in the agent's heading convention.
//!
//! 0° points up the map (image `-y`), 90° points left (image `-x`), and angles
//! grow counter-clockwise as seen on screen, matching the in-game compass.

use super::types::Point;

/// Bearing from `from` to `to`, in degrees within `[0, 360)`.
pub fn bearing(from: Point, to: Point) -> f64 {
    let x = f64::from(to.x - from.x);
    // Flip image rows so +y points up the map.
    let y = -f64::from(to.y - from.y);

    if y == 0.0 {
        return if x > 0.0 {
            270.0
        } else if x == 0.0 {
            0.0
        } else {
            90.0
        };
    }
    if x == 0.0 {
        return if y > 0.0 { 0.0 } else { 180.0 };
    }

    let angle = (y.abs() / x.abs()).atan().to_degrees();
    match (x > 0.0, y > 0.0) {
        (true, true) => 270.0 + angle,
        (true, false) => 180.0 + (90.0 - angle),
        (false, true) => 90.0 - angle,
        (false, false) => 90.0 + angle,
    }
}

/// Smallest absolute difference between two bearings, in `[0, 180]`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants_are_continuous() {
        let origin = Point::new(0, 0);
        assert!((bearing(origin, Point::new(1, -1)) - 315.0).abs() < 1e-9);
        assert!((bearing(origin, Point::new(1, 1)) - 225.0).abs() < 1e-9);
        assert!((bearing(origin, Point::new(-1, -1)) - 45.0).abs() < 1e-9);
        assert!((bearing(origin, Point::new(-1, 1)) - 135.0).abs() < 1e-9);
    }

    #[test]
    fn difference_wraps_around_north() {
        assert!((angular_difference(355.0, 3.0) - 8.0).abs() < 1e-9);
        assert!((angular_difference(90.0, 270.0) - 180.0).abs() < 1e-9);
        assert_eq!(angular_difference(42.0, 42.0), 0.0);
    }
}
