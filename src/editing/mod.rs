// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod debounce;
pub mod edit_types;
pub mod interaction;
pub mod mouse;
pub mod selection;
pub mod session;
pub mod undo;
pub mod viewport;

pub use edit_types::EditType;
pub use hit_test::HitTarget;
pub use interaction::{InteractionController, InteractionState, Outcome};
pub use mouse::{Modifiers, MouseButton, MouseEvent};
pub use selection::Selection;
pub use session::{DEFAULT_SOURCE, EditSession};
pub use undo::UndoState;
pub use viewport::ViewPort;
