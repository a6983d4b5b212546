//! Linear undo/redo history over full-document snapshots.
//!
//! Each entry is a deep copy of the elements array at one point in time,
//! with an integer cursor into the list. Pushing after an undo truncates
//! the redo tail, so the history is always a straight line: k edits from
//! S0 followed by k undos lands exactly back on S0, and k redos returns
//! to Sk. Snapshot-per-edit is O(document) per edit, which is fine at the
//! document sizes this editor targets.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::element::Element;

/// Snapshot stack plus cursor. The cursor always points at the snapshot
/// matching the live document.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Element>>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history seeded with an empty baseline snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self { snapshots: vec![Vec::new()], cursor: 0 }
    }

    /// Drop all history and start over from the given baseline, e.g. when
    /// a document is loaded into the editor.
    pub fn reset(&mut self, baseline: Vec<Element>) {
        self.snapshots = vec![baseline];
        self.cursor = 0;
    }

    /// Record a new snapshot: truncate anything after the cursor, append a
    /// deep copy, and advance the cursor onto it.
    pub fn push(&mut self, elements: &[Element]) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(elements.to_vec());
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one snapshot and return a copy of it, or `None` when
    /// already at the oldest state.
    pub fn undo(&mut self) -> Option<Vec<Element>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Step forward one snapshot and return a copy of it, or `None` when
    /// already at the newest state.
    pub fn redo(&mut self) -> Option<Vec<Element>> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of snapshots currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false — the history keeps at least its baseline snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
