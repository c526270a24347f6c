//! Text block anchored at its top-left corner.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{points_bounds, rotate_point, scale_point, ObjectGeometry, Rgba};

/// Approximate advance width of one character, as a fraction of font size.
const CHAR_ADVANCE: f64 = 0.6;
/// Line height as a fraction of font size.
const LINE_HEIGHT: f64 = 1.25;

/// A multi-line text block. `position` is the top-left corner of the
/// layout box; `rotation` is applied about the box center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub position: Point,
    pub content: String,
    pub font_size: f64,
    pub rotation: f64,
    pub color: Rgba,
}

impl Text {
    pub fn new(position: Point, content: impl Into<String>, font_size: f64, color: Rgba) -> Self {
        Self {
            position,
            content: content.into(),
            font_size,
            rotation: 0.0,
            color,
        }
    }

    /// Estimated layout size from a monospace-ish character model.
    /// No font metrics are available at this layer.
    pub fn layout_size(&self) -> (f64, f64) {
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in self.content.lines() {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        lines = lines.max(1);
        widest = widest.max(1);
        (
            widest as f64 * self.font_size * CHAR_ADVANCE,
            lines as f64 * self.font_size * LINE_HEIGHT,
        )
    }

    pub fn center(&self) -> Point {
        let (w, h) = self.layout_size();
        Point::new(self.position.x + w / 2.0, self.position.y + h / 2.0)
    }

    fn local_box(&self) -> Rect {
        let (w, h) = self.layout_size();
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + w,
            self.position.y + h,
        )
    }
}

impl ObjectGeometry for Text {
    fn bounds(&self) -> Rect {
        let b = self.local_box();
        if self.rotation.abs() < f64::EPSILON {
            return b.inflate(4.0, 4.0);
        }
        let c = b.center();
        let corners = [
            rotate_point(Point::new(b.x0, b.y0), c, self.rotation),
            rotate_point(Point::new(b.x1, b.y0), c, self.rotation),
            rotate_point(Point::new(b.x1, b.y1), c, self.rotation),
            rotate_point(Point::new(b.x0, b.y1), c, self.rotation),
        ];
        points_bounds(&corners).inflate(4.0, 4.0)
    }

    fn hit_test(&self, point: Point) -> bool {
        let b = self.local_box();
        let local = rotate_point(point, b.center(), -self.rotation);
        b.contains(local)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn scale_about(&mut self, anchor: Point, sx: f64, sy: f64) {
        self.position = scale_point(self.position, anchor, sx, sy);
        // Text cannot stretch per-axis; follow the mean magnitude.
        let factor = (sx.abs() + sy.abs()) / 2.0;
        self.font_size = (self.font_size * factor).max(1.0);
    }

    fn rotate_about(&mut self, _anchor: Point, delta: f64) {
        self.rotation += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_size_multiline() {
        let t = Text::new(Point::ZERO, "ab\nabcd", 10.0, Rgba::black());
        let (w, h) = t.layout_size();
        assert!((w - 4.0 * 10.0 * 0.6).abs() < 1e-12);
        assert!((h - 2.0 * 10.0 * 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_content_has_nonzero_box() {
        let t = Text::new(Point::ZERO, "", 10.0, Rgba::black());
        let (w, h) = t.layout_size();
        assert!(w > 0.0);
        assert!(h > 0.0);
    }

    #[test]
    fn test_hit_inside_box() {
        let t = Text::new(Point::new(10.0, 10.0), "hello", 20.0, Rgba::black());
        assert!(t.hit_test(Point::new(12.0, 15.0)));
        assert!(!t.hit_test(Point::new(200.0, 15.0)));
    }

    #[test]
    fn test_scale_adjusts_font_size() {
        let mut t = Text::new(Point::new(10.0, 10.0), "x", 10.0, Rgba::black());
        t.scale_about(Point::ZERO, 2.0, 2.0);
        assert!((t.font_size - 20.0).abs() < 1e-12);
        assert_eq!(t.position, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_font_size_floor() {
        let mut t = Text::new(Point::ZERO, "x", 10.0, Rgba::black());
        t.scale_about(Point::ZERO, 0.01, 0.01);
        assert!((t.font_size - 1.0).abs() < 1e-12);
    }
}
