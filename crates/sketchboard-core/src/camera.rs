//! Camera module for pan/zoom transforms.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.25;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 6.0;

/// Camera manages the view transform for the drawing surface.
///
/// World and screen space are related by a single uniform-scale affine map:
/// `screen = world * zoom + offset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.zoom,
            (screen_point.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            world_point.x * self.zoom + self.offset.x,
            world_point.y * self.zoom + self.offset.y,
        )
    }

    /// Pan the camera by a delta in screen coordinates.
    ///
    /// Pan deltas are not scale-dependent, so no world-space conversion.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom level, keeping the given screen point fixed.
    ///
    /// Re-solves the offset so that the world point currently under the
    /// anchor stays under it after the zoom change.
    pub fn set_zoom_at(&mut self, new_zoom: f64, anchor: Point) {
        let new_zoom = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(anchor);
        self.zoom = new_zoom;
        self.offset = Vec2::new(
            anchor.x - world_point.x * self.zoom,
            anchor.y - world_point.y * self.zoom,
        );
    }

    /// Zoom by a multiplicative factor, keeping the given screen point fixed.
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) {
        self.set_zoom_at(self.zoom * factor, anchor);
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
