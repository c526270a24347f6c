//! Screen-space selection outline and handle geometry.

use kurbo::{Point, Rect};

use crate::camera::Camera;
use crate::objects::{rotate_point, ObjectGeometry, SceneObject};

/// Half-size of a square corner handle, screen pixels.
pub const CORNER_HALF_SIZE: f64 = 10.0;
/// Radius of the circular rotate handle, screen pixels.
pub const ROTATE_HANDLE_RADIUS: f64 = 7.0;
/// Extra pick tolerance around the rotate handle.
pub const ROTATE_HANDLE_TOLERANCE: f64 = 6.0;
/// Rotate handle offset along the top-edge normal of a rotated quad.
pub const ROTATE_OFFSET_ROTATED: f64 = 28.0;
/// Rotate handle offset above the top-mid of an axis-aligned outline.
pub const ROTATE_OFFSET_AXIS: f64 = 22.0;

/// Corner handle identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Se,
    Sw,
}

/// Result of probing the handle set with a screen point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleHit {
    Rotate,
    Corner(Corner),
    /// Inside the selection outline; starts a move.
    Inside,
}

/// The selection outline in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Axis-aligned outline for baked-rotation and unrotated objects.
    Rect(Rect),
    /// Rotated quadrilateral, corners in nw/ne/se/sw order.
    Quad([Point; 4]),
}

/// Screen-space handle positions for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleSet {
    pub outline: Outline,
    /// Corner handle centers in nw/ne/se/sw order.
    pub corners: [Point; 4],
    /// Rotate handle center.
    pub rotate: Point,
}

impl HandleSet {
    /// Compute the handle set for an object under the given camera.
    ///
    /// Objects with a non-zero intrinsic angle get a rotated quad built
    /// from their local unrotated size; everything else gets the plain
    /// screen AABB of `bounds()`.
    pub fn for_object(object: &SceneObject, camera: &Camera) -> Self {
        let rotation = object.rotation();
        if let (Some((w, h)), true) = (object.local_size(), rotation.abs() > f64::EPSILON) {
            let center = object.bounds().center();
            let (hw, hh) = (w / 2.0, h / 2.0);
            let local = [
                Point::new(center.x - hw, center.y - hh),
                Point::new(center.x + hw, center.y - hh),
                Point::new(center.x + hw, center.y + hh),
                Point::new(center.x - hw, center.y + hh),
            ];
            let corners =
                local.map(|p| camera.world_to_screen(rotate_point(p, center, rotation)));
            let rotate = rotate_handle_on_quad(&corners, camera.world_to_screen(center));
            Self {
                outline: Outline::Quad(corners),
                corners,
                rotate,
            }
        } else {
            let b = object.bounds();
            let tl = camera.world_to_screen(Point::new(b.x0, b.y0));
            let br = camera.world_to_screen(Point::new(b.x1, b.y1));
            let screen = Rect::from_points(tl, br);
            let corners = [
                Point::new(screen.x0, screen.y0),
                Point::new(screen.x1, screen.y0),
                Point::new(screen.x1, screen.y1),
                Point::new(screen.x0, screen.y1),
            ];
            let rotate = Point::new(
                (screen.x0 + screen.x1) / 2.0,
                screen.y0 - ROTATE_OFFSET_AXIS,
            );
            Self {
                outline: Outline::Rect(screen),
                corners,
                rotate,
            }
        }
    }

    /// Probe in priority order: rotate handle, then corners, then inside.
    pub fn hit(&self, screen_point: Point) -> Option<HandleHit> {
        let limit = ROTATE_HANDLE_RADIUS + ROTATE_HANDLE_TOLERANCE;
        if (screen_point - self.rotate).hypot() <= limit {
            return Some(HandleHit::Rotate);
        }

        const ORDER: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw];
        for (center, corner) in self.corners.iter().zip(ORDER) {
            if (screen_point.x - center.x).abs() <= CORNER_HALF_SIZE
                && (screen_point.y - center.y).abs() <= CORNER_HALF_SIZE
            {
                return Some(HandleHit::Corner(corner));
            }
        }

        let inside = match &self.outline {
            Outline::Rect(r) => r.contains(screen_point),
            Outline::Quad(q) => point_in_quad(screen_point, q),
        };
        inside.then_some(HandleHit::Inside)
    }
}

/// Place the rotate handle outward from the top edge (nw→ne) of a quad.
fn rotate_handle_on_quad(corners: &[Point; 4], center: Point) -> Point {
    let mid = Point::new(
        (corners[0].x + corners[1].x) / 2.0,
        (corners[0].y + corners[1].y) / 2.0,
    );
    let edge = corners[1] - corners[0];
    let len = edge.hypot();
    if len < f64::EPSILON {
        return Point::new(mid.x, mid.y - ROTATE_OFFSET_ROTATED);
    }
    // Two unit normals exist; take the one pointing away from center.
    let n = kurbo::Vec2::new(-edge.y / len, edge.x / len);
    let outward = if (mid - center).dot(n) >= 0.0 { n } else { -n };
    mid + outward * ROTATE_OFFSET_ROTATED
}

/// Convex quad containment via consistent cross-product signs.
fn point_in_quad(p: Point, quad: &[Point; 4]) -> bool {
    let mut sign = 0.0f64;
    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross.abs() < f64::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Rectangle, Rgba, Stroke};

    fn rect_object() -> SceneObject {
        SceneObject::Rectangle(Rectangle::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            2.0,
            Rgba::black(),
        ))
    }

    #[test]
    fn test_axis_aligned_outline() {
        let camera = Camera::new();
        let set = HandleSet::for_object(&rect_object(), &camera);
        let Outline::Rect(r) = &set.outline else {
            panic!("expected axis-aligned outline");
        };
        // bounds margin for width 2 is 5
        assert!((r.x0 - -5.0).abs() < 1e-9);
        assert!((r.x1 - 105.0).abs() < 1e-9);
        // rotate handle above the top-mid
        assert!((set.rotate.x - 50.0).abs() < 1e-9);
        assert!((set.rotate.y - (-5.0 - ROTATE_OFFSET_AXIS)).abs() < 1e-9);
    }

    #[test]
    fn test_rotated_object_gets_quad() {
        let mut r = Rectangle::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            2.0,
            Rgba::black(),
        );
        r.rotation = std::f64::consts::FRAC_PI_4;
        let set = HandleSet::for_object(&SceneObject::Rectangle(r), &camera());
        assert!(matches!(set.outline, Outline::Quad(_)));
        // Rotate handle sits outside the quad.
        let Outline::Quad(q) = &set.outline else {
            unreachable!()
        };
        assert!(!point_in_quad(set.rotate, q));
    }

    fn camera() -> Camera {
        Camera::new()
    }

    #[test]
    fn test_hit_priority_rotate_first() {
        let set = HandleSet::for_object(&rect_object(), &camera());
        assert_eq!(set.hit(set.rotate), Some(HandleHit::Rotate));
        // Within the +6 tolerance ring.
        let near = Point::new(set.rotate.x + 12.0, set.rotate.y);
        assert_eq!(set.hit(near), Some(HandleHit::Rotate));
        let far = Point::new(set.rotate.x + 14.0, set.rotate.y);
        assert_ne!(set.hit(far), Some(HandleHit::Rotate));
    }

    #[test]
    fn test_corner_hit() {
        let set = HandleSet::for_object(&rect_object(), &camera());
        let nw = set.corners[0];
        assert_eq!(
            set.hit(Point::new(nw.x + 9.0, nw.y + 9.0)),
            Some(HandleHit::Corner(Corner::Nw))
        );
    }

    #[test]
    fn test_inside_signals_move() {
        let set = HandleSet::for_object(&rect_object(), &camera());
        assert_eq!(set.hit(Point::new(50.0, 25.0)), Some(HandleHit::Inside));
        assert_eq!(set.hit(Point::new(400.0, 400.0)), None);
    }

    #[test]
    fn test_stroke_uses_axis_outline() {
        let mut s = Stroke::new(Point::new(10.0, 10.0), 2.0, Rgba::black());
        s.add_point(Point::new(60.0, 40.0));
        let set = HandleSet::for_object(&SceneObject::Stroke(s), &camera());
        assert!(matches!(set.outline, Outline::Rect(_)));
    }

    #[test]
    fn test_camera_zoom_moves_handles() {
        let mut cam = Camera::new();
        cam.zoom = 2.0;
        let set = HandleSet::for_object(&rect_object(), &cam);
        let Outline::Rect(r) = &set.outline else {
            unreachable!()
        };
        assert!((r.x1 - 210.0).abs() < 1e-9);
    }
}
