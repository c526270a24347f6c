//! Arrow: a line segment with a rendered head at the end point.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{
    bounds_margin, pick_tolerance, point_to_segment_dist, rotate_point, scale_point,
    ObjectGeometry, Rgba,
};

/// Length of each arrowhead wing, in world units.
pub const ARROW_HEAD_LENGTH: f64 = 15.0;
/// Angle between the shaft direction and each wing.
pub const ARROW_HEAD_ANGLE: f64 = 0.85 * std::f64::consts::PI;

/// An arrow from `start` to `end`. The head is derived at render/export
/// time from the shaft direction, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub color: Rgba,
}

impl Arrow {
    pub fn new(start: Point, end: Point, width: f64, color: Rgba) -> Self {
        Self {
            start,
            end,
            width,
            color,
        }
    }

    /// The angle of the shaft in radians.
    pub fn angle(&self) -> f64 {
        let d = self.end - self.start;
        d.y.atan2(d.x)
    }

    /// End points of the two head wings, or `None` for a degenerate shaft.
    pub fn head_wings(&self) -> Option<[Point; 2]> {
        if (self.end - self.start).hypot() < f64::EPSILON {
            return None;
        }
        let angle = self.angle();
        let wing = |side: f64| {
            let a = angle + side * ARROW_HEAD_ANGLE;
            Point::new(
                self.end.x + ARROW_HEAD_LENGTH * a.cos(),
                self.end.y + ARROW_HEAD_LENGTH * a.sin(),
            )
        };
        Some([wing(1.0), wing(-1.0)])
    }
}

impl ObjectGeometry for Arrow {
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
