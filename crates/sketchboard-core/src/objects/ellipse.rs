//! Ellipse inscribed in a corner-defined box, with its own rotation.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{bounds_margin, points_bounds, rotate_point, scale_point, ObjectGeometry, Rgba};

/// Normalized radial distance at or below which a pick counts as a hit.
/// Slightly above 1.0 so thin outlines remain clickable near the rim.
const HIT_RADIAL_LIMIT: f64 = 1.2;

/// An ellipse inscribed in the box spanned by `p1`/`p2`, rotated about
/// its center by `rotation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub p1: Point,
    pub p2: Point,
    pub rotation: f64,
    pub width: f64,
    pub color: Rgba,
}

impl Ellipse {
    pub fn new(p1: Point, p2: Point, width: f64, color: Rgba) -> Self {
        Self {
            p1,
            p2,
            rotation: 0.0,
            width,
            color,
        }
    }

    pub fn box_rect(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }

    pub fn center(&self) -> Point {
        self.box_rect().center()
    }

    /// Semi-axes (rx, ry).
    pub fn radii(&self) -> (f64, f64) {
        let b = self.box_rect();
        (b.width() / 2.0, b.height() / 2.0)
    }

    /// The four corners of the bounding box in world space, rotation
    /// applied.
    pub fn corners(&self) -> [Point; 4] {
        let b = self.box_rect();
        let c = self.center();
        [
            rotate_point(Point::new(b.x0, b.y0), c, self.rotation),
            rotate_point(Point::new(b.x1, b.y0), c, self.rotation),
            rotate_point(Point::new(b.x1, b.y1), c, self.rotation),
            rotate_point(Point::new(b.x0, b.y1), c, self.rotation),
        ]
    }
}

impl ObjectGeometry for Ellipse {
    fn bounds(&self) -> Rect {
        let m = bounds_margin(self.width);
        if self.rotation.abs() < f64::EPSILON {
            self.box_rect().inflate(m, m)
        } else {
            points_bounds(&self.corners()).inflate(m, m)
        }
    }

    fn hit_test(&self, point: Point) -> bool {
        let c = self.center();
        let local = rotate_point(point, c, -self.rotation);
        let (rx, ry) = self.radii();
        if rx < f64::EPSILON || ry < f64::EPSILON {
            return false;
        }
        let nx = (local.x - c.x) / rx;
        let ny = (local.y - c.y) / ry;
        (nx * nx + ny * ny).sqrt() <= HIT_RADIAL_LIMIT
    }

    fn translate(&mut self, delta: Vec2) {
        self.p1 += delta;
        self.p2 += delta;
    }

    fn scale_about(&mut self, anchor: Point, sx: f64, sy: f64) {
        self.p1 = scale_point(self.p1, anchor, sx, sy);
        self.p2 = scale_point(self.p2, anchor, sx, sy);
    }

    fn rotate_about(&mut self, _anchor: Point, delta: f64) {
        self.rotation += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ellipse {
        Ellipse::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0), 2.0, Rgba::black())
    }

    #[test]
    fn test_hit_center_and_rim() {
        let e = sample();
        assert!(e.hit_test(Point::new(50.0, 25.0)));
        // On the rim: normalized distance exactly 1.0.
        assert!(e.hit_test(Point::new(100.0, 25.0)));
        // Outside the 1.2 slack.
        assert!(!e.hit_test(Point::new(115.0, 25.0)));
    }

    #[test]
    fn test_hit_slack_boundary() {
        let e = sample();
        // rx = 50, so normalized 1.2 along the x axis is x = 110.
        assert!(e.hit_test(Point::new(109.9, 25.0)));
        assert!(!e.hit_test(Point::new(110.1, 25.0)));
    }

    #[test]
    fn test_degenerate_ellipse_never_hit() {
        let e = Ellipse::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 2.0, Rgba::black());
        assert!(!e.hit_test(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_rotated_bounds_cover_corners() {
        let mut e = sample();
        e.rotation = std::f64::consts::FRAC_PI_4;
        let b = e.bounds();
        for corner in e.corners() {
            assert!(b.contains(corner));
        }
        // A 45-degree turn of a 100x50 box widens the vertical extent
        // past the unrotated box.
        assert!(b.height() > 50.0 + 2.0 * bounds_margin(2.0));
    }

    #[test]
    fn test_rotated_hit() {
        let mut e = sample();
        e.rotation = std::f64::consts::FRAC_PI_2;
        // Long axis now vertical.
        assert!(e.hit_test(Point::new(50.0, 70.0)));
        assert!(!e.hit_test(Point::new(98.0, 25.0)));
    }
}
