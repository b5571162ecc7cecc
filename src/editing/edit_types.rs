// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit types for undo grouping

/// Kind of edit handed to the session
///
/// Consecutive `Drag` edits collapse into one history entry, so undoing a
/// drag restores the list as it was before the gesture started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditType {
    /// Discrete edit (split, delete, slope reset); always its own entry
    #[default]
    Normal,

    /// Drag in progress; replaces the entry the drag started
    Drag,

    /// Drag released; closes the current group
    DragUp,
}

impl EditType {
    /// Whether an edit of this type continues the previous entry
    pub fn continues(self, previous: Option<EditType>) -> bool {
        self == EditType::Drag && previous == Some(EditType::Drag)
    }
}
