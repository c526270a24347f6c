//! The board document: everything a snapshot round-trips.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::background::BackgroundImage;
use crate::camera::Camera;
use crate::objects::{ObjectGeometry, Rgba, SceneObject};
use crate::overlay::{Overlay, OverlayError};
use crate::tool::Tool;

pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
    #[error(transparent)]
    Image(#[from] crate::background::ImageError),
}

/// The live document. Serializing a `Board` yields the opaque snapshot
/// string used by history and persistence; the snapshot owns deep
/// copies of all object data, including the background and overlay
/// source bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub tool: Tool,
    pub color: Rgba,
    pub stroke_width: f64,
    pub camera: Camera,
    pub background: Option<BackgroundImage>,
    pub objects: Vec<SceneObject>,
    pub overlay: Option<Overlay>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            tool: Tool::default(),
            color: Rgba::black(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            camera: Camera::new(),
            background: None,
            objects: Vec::new(),
            overlay: None,
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the full document to an opaque snapshot string.
    pub fn to_snapshot(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuild a document from a snapshot string, re-deriving the
    /// overlay's parsed node list from its stored source.
    pub fn from_snapshot(snapshot: &str) -> Result<Self, BoardError> {
        let mut board: Board = serde_json::from_str(snapshot)?;
        if let Some(overlay) = &mut board.overlay {
            overlay.rehydrate()?;
        }
        Ok(board)
    }

    /// Append an object, returning its index.
    pub fn push_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Remove an object by index. Out-of-range indices are ignored.
    pub fn remove_object(&mut self, index: usize) {
        if index < self.objects.len() {
            self.objects.remove(index);
        }
    }

    /// Topmost object under a world point: last drawn wins, so iterate
    /// back-to-front and take the first hit.
    pub fn object_at(&self, world_point: Point) -> Option<usize> {
        self.objects
            .iter()
            .enumerate()
            .rev()
            .find(|(_, obj)| obj.hit_test(world_point))
            .map(|(i, _)| i)
    }

    /// Remove all objects, keeping camera, background and overlay.
    pub fn clear_objects(&mut self) {
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Rectangle, Stroke};

    fn rect_at(x: f64, y: f64) -> SceneObject {
        SceneObject::Rectangle(Rectangle::new(
            Point::new(x, y),
            Point::new(x + 100.0, y + 100.0),
            2.0,
            Rgba::black(),
        ))
    }

    #[test]
    fn test_topmost_wins() {
        let mut board = Board::new();
        board.push_object(rect_at(0.0, 0.0));
        board.push_object(rect_at(50.0, 50.0));

        // Overlap region hits the later object.
        assert_eq!(board.object_at(Point::new(75.0, 75.0)), Some(1));
        // Non-overlap region still hits the first.
        assert_eq!(board.object_at(Point::new(10.0, 10.0)), Some(0));
        assert_eq!(board.object_at(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut board = Board::new();
        board.title = "demo".into();
        board.stroke_width = 7.0;
        board.camera.zoom = 2.0;
        board.push_object(SceneObject::Stroke(Stroke::new(
            Point::new(1.0, 2.0),
            3.0,
            Rgba::new(10, 20, 30, 255),
        )));

        let snapshot = board.to_snapshot().unwrap();
        let restored = Board::from_snapshot(&snapshot).unwrap();

        assert_eq!(restored.id, board.id);
        assert_eq!(restored.title, "demo");
        assert_eq!(restored.objects, board.objects);
        assert!((restored.camera.zoom - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_rehydrates_overlay() {
        let mut board = Board::new();
        let svg = r#"<svg viewBox="0 0 10 10"><rect width="5" height="5"/></svg>"#;
        let mut overlay = Overlay::from_source(svg.to_string()).unwrap();
        overlay.step_cursor(1);
        board.overlay = Some(overlay);

        let snapshot = board.to_snapshot().unwrap();
        let restored = Board::from_snapshot(&snapshot).unwrap();

        let ov = restored.overlay.unwrap();
        assert_eq!(ov.node_count(), 1);
        assert_eq!(ov.visible_markup().count(), 1);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut board = Board::new();
        board.push_object(rect_at(0.0, 0.0));
        board.remove_object(5);
        assert_eq!(board.objects.len(), 1);
    }
}
