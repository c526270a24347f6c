//! Undo/redo stacks over opaque serialized document snapshots.

/// Maximum number of retained undo entries. A memory bound, not a
/// correctness requirement: the oldest entry is dropped beyond it.
pub const HISTORY_LIMIT: usize = 120;

/// Snapshot-based history. Entries are serialized documents, which
/// guarantees copy isolation between history and live state.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pre-mutation snapshot. Called once at the start of a
    /// mutating gesture or discrete action, never mid-drag. Clears redo.
    pub fn push_undo(&mut self, snapshot: String) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > HISTORY_LIMIT {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Pop the last undo snapshot, parking `current` on the redo stack.
    pub fn undo(&mut self, current: String) -> Option<String> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Pop the last redo snapshot, parking `current` on the undo stack.
    pub fn redo(&mut self, current: String) -> Option<String> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
