//! Drawable object definitions for the board.

mod arrow;
mod ellipse;
mod line;
mod rect;
mod stroke;
mod text;

pub use arrow::{Arrow, ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH};
pub use ellipse::Ellipse;
pub use line::Line;
pub use rect::Rectangle;
pub use stroke::{Erase, Stroke};
pub use text::Text;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// CSS representation: `#rrggbb`, or `rgba(...)` when translucent.
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f64::from(self.a) / 255.0
            )
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::black()
    }
}

/// Pick tolerance for polyline-like objects, in world units.
pub fn pick_tolerance(stroke_width: f64) -> f64 {
    (stroke_width * 1.5).max(8.0)
}

/// Margin added around object bounds, derived from the stroke width.
pub(crate) fn bounds_margin(stroke_width: f64) -> f64 {
    stroke_width / 2.0 + 4.0
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    if points.len() == 1 {
        return (point - points[0]).hypot();
    }
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Rotate a point around an anchor by an angle in radians.
pub fn rotate_point(point: Point, anchor: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let d = point - anchor;
    Point::new(
        anchor.x + d.x * cos - d.y * sin,
        anchor.y + d.x * sin + d.y * cos,
    )
}

/// Scale a point about an anchor with independent per-axis factors.
pub fn scale_point(point: Point, anchor: Point, sx: f64, sy: f64) -> Point {
    Point::new(
        anchor.x + (point.x - anchor.x) * sx,
        anchor.y + (point.y - anchor.y) * sy,
    )
}

/// World-space AABB of the given points.
pub(crate) fn points_bounds(points: &[Point]) -> Rect {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    if points.is_empty() {
        return Rect::ZERO;
    }
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Common geometry operations implemented by every object variant.
pub trait ObjectGeometry {
    /// World-space AABB, padded by a stroke-width-derived margin.
    ///
    /// Drives selection-outline placement and coarse hit rejection, not
    /// rendering, so rotated ellipse/text bounds may be approximate.
    fn bounds(&self) -> Rect;

    /// Check whether a world point hits this object.
    fn hit_test(&self, point: Point) -> bool;

    /// Move the object by a world-space delta.
    fn translate(&mut self, delta: Vec2);

    /// Scale the object about an anchor with per-axis factors.
    ///
    /// For own-rotation variants the factors are interpreted along the
    /// object's local (de-rotated) axes.
    fn scale_about(&mut self, anchor: Point, sx: f64, sy: f64);

    /// Rotate the object by a delta angle around an anchor.
    fn rotate_about(&mut self, anchor: Point, delta: f64);
}

/// A drawable object: tagged union over all variants.
///
/// Two families exist and the split matters for handles and scaling:
/// variants with an intrinsic angle field (`Rectangle`, `Ellipse`, `Text`)
/// versus variants that bake rotation into their stored coordinates
/// (`Stroke`, `Erase`, `Line`, `Arrow`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneObject {
    Stroke(Stroke),
    Erase(Erase),
    Line(Line),
    Arrow(Arrow),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Text(Text),
}

impl SceneObject {
    /// Whether this variant stores an explicit rotation angle.
    pub fn has_own_rotation(&self) -> bool {
        matches!(
            self,
            SceneObject::Rectangle(_) | SceneObject::Ellipse(_) | SceneObject::Text(_)
        )
    }

    /// The stored rotation angle in radians (0 for baked-rotation variants).
    pub fn rotation(&self) -> f64 {
        match self {
            SceneObject::Rectangle(r) => r.rotation,
            SceneObject::Ellipse(e) => e.rotation,
            SceneObject::Text(t) => t.rotation,
            _ => 0.0,
        }
    }

    /// Local unrotated size for own-rotation variants, `None` otherwise.
    pub fn local_size(&self) -> Option<(f64, f64)> {
        match self {
            SceneObject::Rectangle(r) => {
                let b = r.box_rect();
                Some((b.width(), b.height()))
            }
            SceneObject::Ellipse(e) => {
                let b = e.box_rect();
                Some((b.width(), b.height()))
            }
            SceneObject::Text(t) => Some(t.layout_size()),
            _ => None,
        }
    }

    /// Whether this object erases previously drawn ink.
    pub fn is_erase(&self) -> bool {
        matches!(self, SceneObject::Erase(_))
    }
}

impl ObjectGeometry for SceneObject {
    fn bounds(&self) -> Rect {
        match self {
            SceneObject::Stroke(o) => o.bounds(),
            SceneObject::Erase(o) => o.bounds(),
            SceneObject::Line(o) => o.bounds(),
            SceneObject::Arrow(o) => o.bounds(),
            SceneObject::Rectangle(o) => o.bounds(),
            SceneObject::Ellipse(o) => o.bounds(),
            SceneObject::Text(o) => o.bounds(),
        }
    }

    fn hit_test(&self, point: Point) -> bool {
        match self {
            SceneObject::Stroke(o) => o.hit_test(point),
            SceneObject::Erase(o) => o.hit_test(point),
            SceneObject::Line(o) => o.hit_test(point),
            SceneObject::Arrow(o) => o.hit_test(point),
            SceneObject::Rectangle(o) => o.hit_test(point),
            SceneObject::Ellipse(o) => o.hit_test(point),
            SceneObject::Text(o) => o.hit_test(point),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            SceneObject::Stroke(o) => o.translate(delta),
            SceneObject::Erase(o) => o.translate(delta),
            SceneObject::Line(o) => o.translate(delta),
            SceneObject::Arrow(o) => o.translate(delta),
            SceneObject::Rectangle(o) => o.translate(delta),
            SceneObject::Ellipse(o) => o.translate(delta),
            SceneObject::Text(o) => o.translate(delta),
        }
    }

    fn scale_about(&mut self, anchor: Point, sx: f64, sy: f64) {
        match self {
            SceneObject::Stroke(o) => o.scale_about(anchor, sx, sy),
            SceneObject::Erase(o) => o.scale_about(anchor, sx, sy),
            SceneObject::Line(o) => o.scale_about(anchor, sx, sy),
            SceneObject::Arrow(o) => o.scale_about(anchor, sx, sy),
            SceneObject::Rectangle(o) => o.scale_about(anchor, sx, sy),
            SceneObject::Ellipse(o) => o.scale_about(anchor, sx, sy),
            SceneObject::Text(o) => o.scale_about(anchor, sx, sy),
        }
    }

    fn rotate_about(&mut self, anchor: Point, delta: f64) {
        match self {
            SceneObject::Stroke(o) => o.rotate_about(anchor, delta),
            SceneObject::Erase(o) => o.rotate_about(anchor, delta),
            SceneObject::Line(o) => o.rotate_about(anchor, delta),
            SceneObject::Arrow(o) => o.rotate_about(anchor, delta),
            SceneObject::Rectangle(o) => o.rotate_about(anchor, delta),
            SceneObject::Ellipse(o) => o.rotate_about(anchor, delta),
            SceneObject::Text(o) => o.rotate_about(anchor, delta),
        }
    }
}
