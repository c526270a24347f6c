//! Straight line segment.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{
    bounds_margin, pick_tolerance, point_to_segment_dist, rotate_point, scale_point,
    ObjectGeometry, Rgba,
};

/// A straight line between two world-space endpoints.
///
/// Rotation is baked: rotating a line moves its endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub color: Rgba,
}

impl Line {
    pub fn new(start: Point, end: Point, width: f64, color: Rgba) -> Self {
        Self {
            start,
            end,
            width,
            color,
        }
    }

    /// The angle of the segment in radians.
    pub fn angle(&self) -> f64 {
        let d = self.end - self.start;
        d.y.atan2(d.x)
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }
}

impl ObjectGeometry for Line {
    fn bounds(&self) -> Rect {
        let m = bounds_margin(self.width);
        Rect::from_points(self.start, self.end).inflate(m, m)
    }

    fn hit_test(&self, point: Point) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= pick_tolerance(self.width)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn scale_about(&mut self, anchor: Point, sx: f64, sy: f64) {
        self.start = scale_point(self.start, anchor, sx, sy);
        self.end = scale_point(self.end, anchor, sx, sy);
    }

    fn rotate_about(&mut self, anchor: Point, delta: f64) {
        self.start = rotate_point(self.start, anchor, delta);
        self.end = rotate_point(self.end, anchor, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_on_segment() {
        let l = Line::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            2.0,
            Rgba::black(),
        );
        assert!(l.hit_test(Point::new(50.0, 5.0)));
        assert!(!l.hit_test(Point::new(50.0, 20.0)));
        // beyond the endpoints counts the endpoint distance
        assert!(!l.hit_test(Point::new(120.0, 0.0)));
        assert!(l.hit_test(Point::new(105.0, 0.0)));
    }

    #[test]
    fn test_angle() {
        let l = Line::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            2.0,
            Rgba::black(),
        );
        assert!((l.angle() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_scale_about_anchor() {
        let mut l = Line::new(
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            2.0,
            Rgba::black(),
        );
        l.scale_about(Point::new(10.0, 10.0), 2.0, 2.0);
        assert_eq!(l.start, Point::new(10.0, 10.0));
        assert_eq!(l.end, Point::new(30.0, 10.0));
    }
}
