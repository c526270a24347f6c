//! Axis-defined rectangle with its own rotation angle.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{bounds_margin, points_bounds, rotate_point, scale_point, ObjectGeometry, Rgba};

/// A rectangle stored as two opposite corners plus an explicit rotation
/// applied about the box center. The corners stay axis-aligned in local
/// space; the angle is applied when rendering and hit-testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub p1: Point,
    pub p2: Point,
    /// Rotation about the box center, radians.
    pub rotation: f64,
    pub width: f64,
    pub color: Rgba,
}

impl Rectangle {
    pub fn new(p1: Point, p2: Point, width: f64, color: Rgba) -> Self {
        Self {
            p1,
            p2,
            rotation: 0.0,
            width,
            color,
        }
    }

    /// The unrotated local box.
    pub fn box_rect(&self) -> Rect {
        Rect::from_points(self.p1, self.p2)
    }

    pub fn center(&self) -> Point {
        self.box_rect().center()
    }

    /// The four corners in world space, rotation applied.
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

impl ObjectGeometry for Rectangle {
    fn bounds(&self) -> Rect {
        let m = bounds_margin(self.width);
        if self.rotation.abs() < f64::EPSILON {
            self.box_rect().inflate(m, m)
        } else {
            points_bounds(&self.corners()).inflate(m, m)
        }
    }

    fn hit_test(&self, point: Point) -> bool {
        // De-rotate the point into the local frame, then box-test.
        let c = self.center();
        let local = rotate_point(point, c, -self.rotation);
        let b = self.box_rect();
        let hw = b.width() / 2.0 + self.width / 2.0;
        let hh = b.height() / 2.0 + self.width / 2.0;
        (local.x - c.x).abs() <= hw && (local.y - c.y).abs() <= hh
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

    fn sample() -> Rectangle {
        Rectangle::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0), 2.0, Rgba::black())
    }

    #[test]
    fn test_hit_inside_unrotated() {
        let r = sample();
        assert!(r.hit_test(Point::new(50.0, 25.0)));
        assert!(r.hit_test(Point::new(1.0, 1.0)));
        assert!(!r.hit_test(Point::new(150.0, 25.0)));
    }

    #[test]
    fn test_hit_respects_rotation() {
        let mut r = sample();
        r.rotation = std::f64::consts::FRAC_PI_2;
        // After a quarter turn about (50,25), the long axis is vertical.
        assert!(r.hit_test(Point::new(50.0, 70.0)));
        assert!(!r.hit_test(Point::new(95.0, 25.0)));
    }

    #[test]
    fn test_rotate_about_only_touches_angle() {
        let mut r = sample();
        let (p1, p2) = (r.p1, r.p2);
        r.rotate_about(Point::new(50.0, 25.0), 0.3);
        assert_eq!(r.p1, p1);
        assert_eq!(r.p2, p2);
        assert!((r.rotation - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_corner_drag_scale_scenario() {
        // Dragging the SE corner of a 100x50 box by (+25,+25) about the
        // center yields per-axis factors 1.5 and 2.0.
        let mut r = sample();
        r.scale_about(r.center(), 1.5, 2.0);
        assert_eq!(r.p1, Point::new(-25.0, -25.0));
        assert_eq!(r.p2, Point::new(125.0, 75.0));
    }

    #[test]
    fn test_rotated_bounds_cover_corners() {
        let mut r = sample();
        r.rotation = std::f64::consts::FRAC_PI_4;
        let b = r.bounds();
        for corner in r.corners() {
            assert!(b.contains(corner));
        }
    }
}
