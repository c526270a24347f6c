//! The editor: pointer/keyboard surface over the board document.
//!
//! All mutation happens synchronously inside these handlers. One
//! pointer gesture is active at a time, keyed by a captured pointer id;
//! other pointers are ignored until release.

use kurbo::Point;
use log::{debug, warn};

use crate::background::BackgroundImage;
use crate::board::{Board, BoardError};
use crate::gesture::{
    apply_bg_move, apply_bg_rotate, apply_bg_scale, apply_move, apply_rotate, apply_scale,
    rotation_delta, scale_factors, snap_direction, Gesture,
};
use crate::handles::{HandleHit, HandleSet};
use crate::history::History;
use crate::input::{Key, Modifiers, MouseButton, PointerEvent};
use crate::objects::{
    Arrow, Ellipse, Erase, Line, ObjectGeometry, Rectangle, SceneObject, Stroke, Text,
};
use crate::overlay::Overlay;
use crate::tool::Tool;

/// Default font size for newly placed text, world units.
pub const TEXT_FONT_SIZE: f64 = 24.0;
/// Overlay reveal step when the fast modifier is held.
const REVEAL_FAST_STEP: isize = 5;

/// An outstanding request for text content. Placing text is
/// request/response: pointer-down with the text tool records the world
/// point and the host resolves it with `submit_text` or `cancel_text`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingText {
    pub world: Point,
}

#[derive(Debug, Default)]
pub struct Editor {
    pub board: Board,
    history: History,
    pub selection: Option<usize>,
    gesture: Gesture,
    /// Space-pan flag from the host: pointer-down pans regardless of tool.
    pub space_pan: bool,
    captured_pointer: Option<u64>,
    pending_text: Option<PendingText>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            ..Self::default()
        }
    }

    pub fn pending_text(&self) -> Option<PendingText> {
        self.pending_text
    }

    pub fn gesture_active(&self) -> bool {
        !self.gesture.is_idle()
    }

    fn push_undo(&mut self) -> Result<(), BoardError> {
        let snapshot = self.board.to_snapshot()?;
        self.history.push_undo(snapshot);
        Ok(())
    }

    /// Dispatch a unified pointer event. Only the left button starts a
    /// gesture; scroll zooms about the pointer position.
    pub fn handle_pointer_event(
        &mut self,
        pointer_id: u64,
        event: PointerEvent,
        modifiers: Modifiers,
    ) -> Result<(), BoardError> {
        match event {
            PointerEvent::Down { position, button } => {
                if button == MouseButton::Left {
                    self.pointer_down(pointer_id, position, modifiers)?;
                }
                Ok(())
            }
            PointerEvent::Up { position: _, button } => {
                if button == MouseButton::Left {
                    self.pointer_up(pointer_id);
                }
                Ok(())
            }
            PointerEvent::Move { position } => {
                self.pointer_move(pointer_id, position, modifiers);
                Ok(())
            }
            PointerEvent::Scroll { position, delta } => {
                let factor = (-delta.y / 500.0).exp();
                self.board.camera.zoom_by(factor, position);
                Ok(())
            }
        }
    }

    /// Pointer-down entry point. Evaluates the gesture entry rules in
    /// order: space-pan, text placement, select, background tools,
    /// drawing tools.
    pub fn pointer_down(
        &mut self,
        pointer_id: u64,
        screen: Point,
        _modifiers: Modifiers,
    ) -> Result<(), BoardError> {
        if self.captured_pointer.is_some() {
            return Ok(());
        }
        // A stale text request does not survive a new interaction.
        self.pending_text = None;

        let world = self.board.camera.screen_to_world(screen);

        if self.space_pan {
            self.captured_pointer = Some(pointer_id);
            self.gesture = Gesture::Pan {
                last_screen: screen,
            };
            return Ok(());
        }

        match self.board.tool {
            Tool::Text => {
                // No drag phase; the host answers with submit/cancel.
                self.pending_text = Some(PendingText { world });
                Ok(())
            }
            Tool::Select => {
                self.captured_pointer = Some(pointer_id);
                self.begin_select_gesture(screen, world)
            }
            tool if tool.is_background() => {
                self.captured_pointer = Some(pointer_id);
                if self.selection.is_some() {
                    // Background tools act on the selection when one exists.
                    self.begin_selection_transform(tool, world)
                } else {
                    self.begin_background_transform(tool, world)
                }
            }
            tool => {
                debug_assert!(tool.is_drawing());
                self.captured_pointer = Some(pointer_id);
                self.push_undo()?;
                let object = self.new_object_for_tool(tool, world);
                let index = self.board.push_object(object);
                self.gesture = Gesture::Draw {
                    index,
                    start_world: world,
                };
                Ok(())
            }
        }
    }

    fn new_object_for_tool(&self, tool: Tool, world: Point) -> SceneObject {
        let width = self.board.stroke_width;
        let color = self.board.color;
        match tool {
            Tool::Pen => SceneObject::Stroke(Stroke::new(world, width, color)),
            Tool::Eraser => SceneObject::Erase(Erase::new(world, width)),
            Tool::Line => SceneObject::Line(Line::new(world, world, width, color)),
            Tool::Arrow => SceneObject::Arrow(Arrow::new(world, world, width, color)),
            Tool::Rect => SceneObject::Rectangle(Rectangle::new(world, world, width, color)),
            Tool::Circle => SceneObject::Ellipse(Ellipse::new(world, world, width, color)),
            // Non-drawing tools never reach here.
            _ => SceneObject::Stroke(Stroke::new(world, width, color)),
        }
    }

    fn begin_select_gesture(&mut self, screen: Point, world: Point) -> Result<(), BoardError> {
        // Handles of the current selection take priority over objects.
        if let Some(index) = self.selection {
            if let Some(object) = self.board.objects.get(index) {
                let handles = HandleSet::for_object(object, &self.board.camera);
                if let Some(hit) = handles.hit(screen) {
                    let snapshot = Box::new(object.clone());
                    self.push_undo()?;
                    let anchor = snapshot.bounds().center();
                    self.gesture = match hit {
                        HandleHit::Corner(_) => Gesture::ScaleSelection {
                            index,
                            snapshot,
                            start_world: world,
                            anchor,
                        },
                        HandleHit::Rotate => Gesture::RotateSelection {
                            index,
                            snapshot,
                            start_world: world,
                            anchor,
                        },
                        HandleHit::Inside => Gesture::MoveSelection {
                            index,
                            snapshot,
                            start_world: world,
                        },
                    };
                    return Ok(());
                }
            }
        }

        match self.board.object_at(world) {
            Some(index) => {
                self.selection = Some(index);
                self.push_undo()?;
                let snapshot = Box::new(self.board.objects[index].clone());
                self.gesture = Gesture::MoveSelection {
                    index,
                    snapshot,
                    start_world: world,
                };
            }
            None => {
                self.selection = None;
            }
        }
        Ok(())
    }

    fn begin_selection_transform(&mut self, tool: Tool, world: Point) -> Result<(), BoardError> {
        let Some(index) = self.selection else {
            return Ok(());
        };
        let Some(object) = self.board.objects.get(index) else {
            return Ok(());
        };
        let snapshot = Box::new(object.clone());
        self.push_undo()?;
        let anchor = snapshot.bounds().center();
        self.gesture = match tool {
            Tool::BgMove => Gesture::MoveSelection {
                index,
                snapshot,
                start_world: world,
            },
            Tool::BgScale => Gesture::ScaleSelection {
                index,
                snapshot,
                start_world: world,
                anchor,
            },
            _ => Gesture::RotateSelection {
                index,
                snapshot,
                start_world: world,
                anchor,
            },
        };
        Ok(())
    }

    fn begin_background_transform(&mut self, tool: Tool, world: Point) -> Result<(), BoardError> {
        let Some(background) = &self.board.background else {
            return Ok(());
        };
        let snapshot = Box::new(background.clone());
        self.push_undo()?;
        self.gesture = match tool {
            Tool::BgMove => Gesture::MoveBackground {
                snapshot,
                start_world: world,
            },
            Tool::BgScale => Gesture::ScaleBackground {
                snapshot,
                start_world: world,
            },
            _ => Gesture::RotateBackground {
                snapshot,
                start_world: world,
            },
        };
        Ok(())
    }

    /// Pointer-move: recompute the live state from the gesture snapshot
    /// and the current pointer, never from the previous live state.
    pub fn pointer_move(&mut self, pointer_id: u64, screen: Point, modifiers: Modifiers) {
        if self.captured_pointer != Some(pointer_id) {
            return;
        }
        let world = self.board.camera.screen_to_world(screen);

        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Pan { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.board.camera.pan(delta);
            }
            Gesture::Draw { index, .. } => {
                let index = *index;
                if let Some(object) = self.board.objects.get_mut(index) {
                    update_draw(object, world, modifiers);
                }
            }
            Gesture::MoveSelection {
                index,
                snapshot,
                start_world,
            } => {
                let updated = apply_move(snapshot, world - *start_world);
                let index = *index;
                if let Some(slot) = self.board.objects.get_mut(index) {
                    *slot = updated;
                }
            }
            Gesture::ScaleSelection {
                index,
                snapshot,
                start_world,
                anchor,
            } => {
                let (sx, sy) = scale_factors(
                    *anchor,
                    *start_world,
                    world,
                    snapshot.rotation(),
                    modifiers.shift,
                );
                let updated = apply_scale(snapshot, *anchor, sx, sy);
                let index = *index;
                if let Some(slot) = self.board.objects.get_mut(index) {
                    *slot = updated;
                }
            }
            Gesture::RotateSelection {
                index,
                snapshot,
                start_world,
                anchor,
            } => {
                let delta = rotation_delta(*anchor, *start_world, world, modifiers.shift);
                let updated = apply_rotate(snapshot, *anchor, delta);
                let index = *index;
                if let Some(slot) = self.board.objects.get_mut(index) {
                    *slot = updated;
                }
            }
            Gesture::MoveBackground {
                snapshot,
                start_world,
            } => {
                let updated = apply_bg_move(snapshot, world - *start_world);
                self.board.background = Some(updated);
            }
            Gesture::ScaleBackground {
                snapshot,
                start_world,
            } => {
                let updated = apply_bg_scale(snapshot, *start_world, world);
                self.board.background = Some(updated);
            }
            Gesture::RotateBackground {
                snapshot,
                start_world,
            } => {
                let updated = apply_bg_rotate(snapshot, *start_world, world, modifiers.shift);
                self.board.background = Some(updated);
            }
        }
    }

    /// Pointer-up releases the gesture unconditionally; everything was
    /// already written live during the drag.
    pub fn pointer_up(&mut self, pointer_id: u64) {
        if self.captured_pointer != Some(pointer_id) {
            return;
        }
        self.captured_pointer = None;
        self.gesture = Gesture::Idle;
    }

    /// Resolve an outstanding text request. Empty content cancels.
    pub fn submit_text(&mut self, content: &str) -> Result<(), BoardError> {
        let Some(pending) = self.pending_text.take() else {
            return Ok(());
        };
        if content.is_empty() {
            return Ok(());
        }
        self.push_undo()?;
        let text = Text::new(pending.world, content, TEXT_FONT_SIZE, self.board.color);
        let index = self.board.push_object(SceneObject::Text(text));
        self.selection = Some(index);
        self.board.tool = Tool::Select;
        Ok(())
    }

    pub fn cancel_text(&mut self) {
        self.pending_text = None;
    }

    /// Delete the selected object. With no selection this is a no-op.
    pub fn delete_selection(&mut self) -> Result<(), BoardError> {
        let Some(index) = self.selection.take() else {
            return Ok(());
        };
        self.push_undo()?;
        self.board.remove_object(index);
        Ok(())
    }

    /// Remove every object from the board.
    pub fn clear(&mut self) -> Result<(), BoardError> {
        self.push_undo()?;
        self.board.clear_objects();
        self.selection = None;
        Ok(())
    }

    /// Set the background image from encoded bytes plus the natural
    /// dimensions reported by the caller's decoder. A decode failure
    /// leaves the background unset.
    pub fn set_background(
        &mut self,
        bytes: &[u8],
        natural_width: f64,
        natural_height: f64,
    ) -> Result<(), BoardError> {
        let background = BackgroundImage::from_bytes(bytes, natural_width, natural_height)
            .map_err(|e| {
                warn!("background image rejected: {e}");
                e
            })?;
        self.push_undo()?;
        self.board.background = Some(background);
        Ok(())
    }

    /// Replace the overlay from document text. A parse failure leaves
    /// all state untouched.
    pub fn load_overlay(&mut self, source: String) -> Result<(), BoardError> {
        let overlay = Overlay::from_source(source)?;
        self.push_undo()?;
        self.board.overlay = Some(overlay);
        Ok(())
    }

    /// Undo: park current state on the redo stack and restore the
    /// previous snapshot. Any in-progress gesture is reset first so a
    /// stale gesture cannot write into the restored object array.
    pub fn undo(&mut self) -> Result<(), BoardError> {
        self.reset_gesture();
        let current = self.board.to_snapshot()?;
        if let Some(snapshot) = self.history.undo(current) {
            self.board = Board::from_snapshot(&snapshot)?;
            self.selection = None;
            debug!("undo applied, {} objects", self.board.objects.len());
        }
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), BoardError> {
        self.reset_gesture();
        let current = self.board.to_snapshot()?;
        if let Some(snapshot) = self.history.redo(current) {
            self.board = Board::from_snapshot(&snapshot)?;
            self.selection = None;
            debug!("redo applied, {} objects", self.board.objects.len());
        }
        Ok(())
    }

    fn reset_gesture(&mut self) {
        self.gesture = Gesture::Idle;
        self.captured_pointer = None;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Keyboard surface: hotkeys, delete, overlay reveal, undo/redo.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Result<(), BoardError> {
        match key {
            Key::Char(c) if modifiers.command() => match c.to_ascii_lowercase() {
                'z' if modifiers.shift => self.redo(),
                'z' => self.undo(),
                'y' => self.redo(),
                _ => Ok(()),
            },
            Key::Char(c) => {
                if let Some(tool) = Tool::from_hotkey(c) {
                    self.board.tool = tool;
                }
                Ok(())
            }
            Key::Delete | Key::Backspace => self.delete_selection(),
            Key::ArrowRight | Key::ArrowDown => {
                self.step_reveal(reveal_step(1, modifiers));
                Ok(())
            }
            Key::ArrowLeft | Key::ArrowUp => {
                self.step_reveal(reveal_step(-1, modifiers));
                Ok(())
            }
            Key::Escape => {
                self.cancel_text();
                Ok(())
            }
            Key::Enter => Ok(()),
        }
    }

    fn step_reveal(&mut self, delta: isize) {
        if let Some(overlay) = &mut self.board.overlay {
            overlay.step_cursor(delta);
        }
    }
}

fn reveal_step(direction: isize, modifiers: Modifiers) -> isize {
    if modifiers.shift {
        direction * REVEAL_FAST_STEP
    } else {
        direction
    }
}

/// Live update of the object being drawn.
fn update_draw(object: &mut SceneObject, world: Point, modifiers: Modifiers) {
    match object {
        SceneObject::Stroke(s) => s.add_point(world),
        SceneObject::Erase(e) => e.add_point(world),
        SceneObject::Line(l) => {
            l.end = if modifiers.shift {
                snap_direction(l.start, world)
            } else {
                world
            };
        }
        SceneObject::Arrow(a) => {
            a.end = if modifiers.shift {
                snap_direction(a.start, world)
            } else {
                world
            };
        }
        SceneObject::Rectangle(r) => r.p2 = world,
        SceneObject::Ellipse(e) => e.p2 = world,
        SceneObject::Text(_) => {}
    }
}
