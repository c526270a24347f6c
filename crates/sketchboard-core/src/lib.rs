//! Core object/transform engine for the Sketchboard drawing surface.
//!
//! The crate owns the geometric data model (strokes, shapes, text), the
//! screen↔world camera math, hit-testing and selection-handle geometry,
//! the pointer-driven gesture state machine, snapshot-based undo/redo,
//! the background image and revealable overlay attachments, and the
//! persistence abstraction. Rendering and export live in separate
//! crates on top of this one.

pub mod background;
pub mod board;
pub mod camera;
pub mod editor;
pub mod gesture;
pub mod handles;
pub mod history;
pub mod input;
pub mod objects;
pub mod overlay;
pub mod storage;
pub mod tool;

pub use background::{BackgroundImage, ImageError, ImageFormat};
pub use board::{Board, BoardError};
pub use camera::{Camera, MAX_ZOOM, MIN_ZOOM};
pub use editor::{Editor, PendingText};
pub use gesture::Gesture;
pub use handles::{Corner, HandleHit, HandleSet, Outline};
pub use history::{History, HISTORY_LIMIT};
pub use input::{Key, Modifiers, MouseButton, PointerEvent};
pub use objects::{
    Arrow, Ellipse, Erase, Line, ObjectGeometry, Rectangle, Rgba, SceneObject, Stroke, Text,
};
pub use overlay::{Overlay, OverlayError, OverlayNode};
pub use storage::{Storage, StorageError, StorageResult};
pub use tool::Tool;
