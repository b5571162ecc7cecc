// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyboard shortcuts for EditSession

use super::EditSession;
use crate::editing::mouse::Modifiers;

impl EditSession {
    /// Handle a key press. Returns whether the key was consumed.
    ///
    /// Ctrl+Z undoes, Ctrl+Y redoes.
    pub fn handle_key(&mut self, key: &str, mods: Modifiers) -> bool {
        if !mods.command() {
            return false;
        }
        if key.eq_ignore_ascii_case("z") {
            self.undo();
            true
        } else if key.eq_ignore_ascii_case("y") {
            self.redo();
            true
        } else {
            false
        }
    }
}
