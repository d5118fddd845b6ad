use super::types::{Point, Rgb};
use crate::common::{NavError, NavResult};
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Eight grid directions: orthogonal first, then diagonal.
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// How terrain costs are derived from the classified image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainCosts {
    pub wall_color: Rgb,
    /// Half-width of the square inspected around a point for wall pixels.
    pub clearance_radius: u32,
    pub wall_cost: u32,
    pub open_cost: u32,
}

impl Default for TerrainCosts {
    fn default() -> Self {
        Self {
            wall_color: Rgb::WHITE,
            clearance_radius: 10,
            wall_cost: 10,
            open_cost: 1,
        }
    }
}

/// Walkability and traversal cost over a classified map image.
///
/// The image is held read-only. Wall proximity is answered from a summed-area
/// table of wall pixels built once at construction, so `cost` is O(1) no matter
/// how large the clearance radius is.
#[derive(Debug, Clone)]
pub struct CostField {
    image: RgbImage,
    costs: TerrainCosts,
    /// (width + 1) x (height + 1) prefix sums of wall pixels.
    wall_sums: Vec<u32>,
    fingerprint: [u8; 16],
}

impl CostField {
    pub fn new(image: RgbImage, costs: TerrainCosts) -> Self {
        let wall_sums = Self::build_wall_sums(&image, costs.wall_color);
        let fingerprint = Self::compute_fingerprint(&image, &costs);
        tracing::debug!(
            "Cost field {}x{} built, fingerprint {:x?}",
            image.width(),
            image.height(),
            fingerprint
        );
        Self {
            image,
            costs,
            wall_sums,
            fingerprint,
        }
    }

    pub fn with_default_costs(image: RgbImage) -> Self {
        Self::new(image, TerrainCosts::default())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn terrain_costs(&self) -> &TerrainCosts {
        &self.costs
    }

    /// Digest of the image content and cost parameters.
    ///
    /// Two fields built from identical pixels and parameters share a
    /// fingerprint, so cached searches survive a reload of the same map and
    /// never leak across different maps.
    pub fn fingerprint(&self) -> [u8; 16] {
        self.fingerprint
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width() && (p.y as u32) < self.height()
    }

    pub fn check_bounds(&self, p: Point) -> NavResult<()> {
        if self.in_bounds(p) {
            Ok(())
        } else {
            Err(NavError::OutOfBounds {
                point: p,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// True iff `p` is inside the image and its pixel is not the wall color.
    pub fn walkable(&self, p: Point) -> bool {
        self.in_bounds(p)
            && !self
                .costs
                .wall_color
                .matches(self.image.get_pixel(p.x as u32, p.y as u32))
    }

    /// Cost of stepping onto `p`: `wall_cost` if any wall pixel lies in the
    /// clearance square around `p`, `open_cost` otherwise.
    pub fn cost(&self, p: Point) -> u32 {
        if self.walls_near(p) > 0 {
            self.costs.wall_cost
        } else {
            self.costs.open_cost
        }
    }

    /// Walkable grid neighbours of `p`, up to eight.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        DIRECTIONS
            .iter()
            .map(move |(dx, dy)| Point::new(p.x + dx, p.y + dy))
            .filter(move |n| self.walkable(*n))
    }

    /// Sum of `cost` over every step of `path` after its first point.
    pub fn path_cost(&self, path: &[Point]) -> u32 {
        path.iter().skip(1).map(|p| self.cost(*p)).sum()
    }

    fn walls_near(&self, p: Point) -> u32 {
        let r = self.costs.clearance_radius as i64;
        let w = self.width() as i64;
        let h = self.height() as i64;
        let x0 = (p.x as i64 - r).clamp(0, w);
        let y0 = (p.y as i64 - r).clamp(0, h);
        let x1 = (p.x as i64 + r + 1).clamp(0, w);
        let y1 = (p.y as i64 + r + 1).clamp(0, h);
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }
        let at = |x: i64, y: i64| self.wall_sums[(y * (w + 1) + x) as usize] as i64;
        (at(x1, y1) - at(x0, y1) - at(x1, y0) + at(x0, y0)) as u32
    }

    fn build_wall_sums(image: &RgbImage, wall: Rgb) -> Vec<u32> {
        let w = image.width() as usize;
        let h = image.height() as usize;
        let stride = w + 1;
        let mut sums = vec![0u32; stride * (h + 1)];
        for y in 0..h {
            let mut row = 0u32;
            for x in 0..w {
                if wall.matches(image.get_pixel(x as u32, y as u32)) {
                    row += 1;
                }
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row;
            }
        }
        sums
    }

    fn compute_fingerprint(image: &RgbImage, costs: &TerrainCosts) -> [u8; 16] {
        let mut input = Vec::with_capacity(image.as_raw().len() + 27);
        input.extend_from_slice(&image.width().to_le_bytes());
        input.extend_from_slice(&image.height().to_le_bytes());
        input.extend_from_slice(&costs.wall_color.0);
        input.extend_from_slice(&costs.clearance_radius.to_le_bytes());
        input.extend_from_slice(&costs.wall_cost.to_le_bytes());
        input.extend_from_slice(&costs.open_cost.to_le_bytes());
        input.extend_from_slice(image.as_raw());
        md5::compute(&input).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, image::Rgb([0, 0, 0]))
    }

    #[test]
    fn wall_penalty_reaches_exactly_the_clearance_radius() {
        let mut img = open(40, 40);
        img.put_pixel(20, 20, image::Rgb([255, 255, 255]));
        let field = CostField::with_default_costs(img);

        assert_eq!(field.cost(Point::new(30, 20)), 10);
        assert_eq!(field.cost(Point::new(30, 30)), 10);
        assert_eq!(field.cost(Point::new(31, 20)), 1);
        assert_eq!(field.cost(Point::new(20, 9)), 1);
        assert!(!field.walkable(Point::new(20, 20)));
        assert!(field.walkable(Point::new(21, 20)));
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let mut img = open(3, 3);
        img.put_pixel(1, 0, image::Rgb([255, 255, 255]));
        let field = CostField::with_default_costs(img);

        let corner: Vec<Point> = field.neighbors(Point::new(0, 0)).collect();
        assert_eq!(corner, vec![Point::new(0, 1), Point::new(1, 1)]);
        assert_eq!(field.neighbors(Point::new(1, 1)).count(), 7);
    }

    #[test]
    fn fingerprint_follows_content() {
        let a = CostField::with_default_costs(open(8, 8));
        let b = CostField::with_default_costs(open(8, 8));
        let mut walled = open(8, 8);
        walled.put_pixel(3, 3, image::Rgb([255, 255, 255]));
        let c = CostField::with_default_costs(walled);

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
