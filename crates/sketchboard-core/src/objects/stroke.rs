//! Freehand ink and erase strokes.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{
    bounds_margin, pick_tolerance, point_to_polyline_dist, points_bounds, rotate_point,
    scale_point, ObjectGeometry, Rgba,
};

/// A freehand ink stroke: an ordered list of world-space points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub width: f64,
    pub color: Rgba,
}

impl Stroke {
    pub fn new(start: Point, width: f64, color: Rgba) -> Self {
        Self {
            points: vec![start],
            width,
            color,
        }
    }

    /// Append a point while the stroke is being drawn.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }
}

impl ObjectGeometry for Stroke {
    fn bounds(&self) -> Rect {
        points_bounds(&self.points).inflate(bounds_margin(self.width), bounds_margin(self.width))
    }

    fn hit_test(&self, point: Point) -> bool {
        if self.points.is_empty() {
            return false;
        }
        point_to_polyline_dist(point, &self.points) <= pick_tolerance(self.width)
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    fn scale_about(&mut self, anchor: Point, sx: f64, sy: f64) {
        for p in &mut self.points {
            *p = scale_point(*p, anchor, sx, sy);
        }
    }

    fn rotate_about(&mut self, anchor: Point, delta: f64) {
        for p in &mut self.points {
            *p = rotate_point(*p, anchor, delta);
        }
    }
}

/// An erase stroke. Geometrically identical to ink but carries no color:
/// it punches previously drawn content out of the picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Erase {
    pub points: Vec<Point>,
    pub width: f64,
}

impl Erase {
    pub fn new(start: Point, width: f64) -> Self {
        Self {
            points: vec![start],
            width,
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }
}

impl ObjectGeometry for Erase {
    fn bounds(&self) -> Rect {
        points_bounds(&self.points).inflate(bounds_margin(self.width), bounds_margin(self.width))
    }

    fn hit_test(&self, point: Point) -> bool {
        if self.points.is_empty() {
            return false;
        }
        point_to_polyline_dist(point, &self.points) <= pick_tolerance(self.width)
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    fn scale_about(&mut self, anchor: Point, sx: f64, sy: f64) {
        for p in &mut self.points {
            *p = scale_point(*p, anchor, sx, sy);
        }
    }

    fn rotate_about(&mut self, anchor: Point, delta: f64) {
        for p in &mut self.points {
            *p = rotate_point(*p, anchor, delta);
        }
    }
}
