//! Tool selection for the drawing surface.

use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tool {
    #[default]
    Select,
    Pen,
    Eraser,
    Line,
    Arrow,
    Rect,
    Circle,
    Text,
    /// Move the background image (or the selection, when one exists).
    BgMove,
    /// Scale the background image (or the selection).
    BgScale,
    /// Rotate the background image (or the selection).
    BgRotate,
}

impl Tool {
    /// Map a single-letter hotkey to a tool.
    pub fn from_hotkey(key: char) -> Option<Tool> {
        match key.to_ascii_lowercase() {
            's' => Some(Tool::Select),
            'p' => Some(Tool::Pen),
            'e' => Some(Tool::Eraser),
            'l' => Some(Tool::Line),
            'a' => Some(Tool::Arrow),
            'r' => Some(Tool::Rect),
            'c' => Some(Tool::Circle),
            't' => Some(Tool::Text),
            'm' => Some(Tool::BgMove),
            'x' => Some(Tool::BgScale),
            'o' => Some(Tool::BgRotate),
            _ => None,
        }
    }

    /// Whether pointer-down with this tool starts drawing a new object.
    pub fn is_drawing(self) -> bool {
        matches!(
            self,
            Tool::Pen | Tool::Eraser | Tool::Line | Tool::Arrow | Tool::Rect | Tool::Circle
        )
    }

    /// Whether this tool targets the background image by default.
    pub fn is_background(self) -> bool {
        matches!(self, Tool::BgMove | Tool::BgScale | Tool::BgRotate)
    }
}
