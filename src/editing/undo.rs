// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Linear undo history of snapshots.
//!
//! The history is a list of states with a cursor on the current one.
//! Pushing after an undo discards everything past the cursor, so there is
//! never more than one redo branch.

/// Snapshot history with a movable cursor
#[derive(Debug, Clone)]
pub struct UndoState<T> {
    entries: Vec<T>,
    cursor: usize,
    max_len: usize,
}

impl<T> UndoState<T> {
    /// History holding `initial`, keeping at most `max_len` entries
    pub fn new(initial: T, max_len: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_len: max_len.max(1),
        }
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// Record a new state after the current one, dropping the redo branch
    /// and, past the limit, the oldest state
    pub fn push(&mut self, item: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(item);
        if self.entries.len() > self.max_len {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Replace the current state without creating an entry
    pub fn update_current(&mut self, item: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries[self.cursor] = item;
    }

    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
