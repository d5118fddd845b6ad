use super::simplifier::dedupe_points;
use super::types::{Point, Rgb};
use image::RgbImage;

/// Objective markers in `image`, scanned row by row, with markers closer than
/// `separation` pixels to an earlier one dropped.
pub fn extract_targets(image: &RgbImage, marker: Rgb, separation: f64) -> Vec<Point> {
    let hits: Vec<Point> = image
        .enumerate_pixels()
        .filter(|(_, _, px)| marker.matches(px))
        .map(|(x, y, _)| Point::new(x as i32, y as i32))
        .collect();
    dedupe_points(&hits, separation)
}
