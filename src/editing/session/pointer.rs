// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer event routing for EditSession

use super::EditSession;
use crate::editing::interaction::Outcome;
use crate::editing::mouse::MouseEvent;
use std::time::Instant;

impl EditSession {
    /// Handle a button press. Returns whether the host should suppress its
    /// default handling of the event.
    pub fn pointer_down(&mut self, event: MouseEvent, now: Instant) -> bool {
        if !self.is_editable() {
            return false;
        }
        let viewport = self.viewport();
        let response = self
            .interaction
            .pointer_down(&self.points, &viewport, event);
        self.handle_outcome(response.outcome, now);
        response.prevent_default
    }

    pub fn pointer_move(&mut self, event: MouseEvent, now: Instant) {
        if !self.is_editable() {
            return;
        }
        let viewport = self.viewport();
        let outcome = self
            .interaction
            .pointer_move(&self.points, &viewport, event);
        self.handle_outcome(outcome, now);
    }

    pub fn pointer_up(&mut self, event: MouseEvent, now: Instant) {
        let viewport = self.viewport();
        let outcome = self.interaction.pointer_up(&self.points, &viewport, event);
        self.handle_outcome(outcome, now);
    }

    /// The pointer left the canvas mid-gesture
    pub fn pointer_cancel(&mut self, now: Instant) {
        let outcome = self.interaction.cancel();
        self.handle_outcome(outcome, now);
    }

    fn handle_outcome(&mut self, outcome: Outcome, now: Instant) {
        match outcome {
            Outcome::Unchanged => {}
            Outcome::Edited { points, edit_type } => {
                self.apply_edit_at(&points, edit_type, now);
            }
            Outcome::DragFinished => self.finish_drag(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EditorConfig;
    use crate::editing::mouse::{MouseButton, MouseEvent};
    use crate::editing::session::EditSession;
    use kurbo::{Point, Size};
    use std::time::Instant;

    const SOURCE: &str = r#"{"type": "minecraft:spline", "spline": {"points": [
        {"location": 0, "value": 0, "derivative": 0},
        {"location": 1, "value": 1, "derivative": 0},
        {"location": 2, "value": 0, "derivative": 0}
    ]}}"#;

    fn session() -> EditSession {
        let mut session = EditSession::new(SOURCE, EditorConfig::immediate());
        session.set_surface_size(Size::new(480.0, 300.0));
        session
    }

    fn device(session: &EditSession, x: f64, y: f64) -> Point {
        session.viewport().domain_to_device(Point::new(x, y))
    }

    #[test]
    fn drag_gesture_is_one_undo_step() {
        let mut session = session();
        let original = session.source().to_string();
        let now = Instant::now();

        let press = device(&session, 1.0, 1.0);
        session.pointer_down(MouseEvent::new(press, Some(MouseButton::Left)), now);
        for y in [1.2, 1.4] {
            // the view reframes as points move, so map through the live viewport
            let to = device(&session, 1.0, y);
            session.pointer_move(MouseEvent::new(to, None), now);
        }
        let release = device(&session, 1.0, 1.4);
        session.pointer_up(MouseEvent::new(release, Some(MouseButton::Left)), now);

        assert!((session.points()[1].y - 1.4).abs() < 0.002);
        assert!(session.undo());
        assert_eq!(session.source(), original);
    }

    #[test]
    fn right_click_deletes_and_suppresses_menu() {
        let mut session = session();
        let at = device(&session, 1.0, 1.0);
        let prevent =
            session.pointer_down(MouseEvent::new(at, Some(MouseButton::Right)), Instant::now());
        assert!(prevent);
        assert_eq!(session.points().len(), 2);
    }

    #[test]
    fn pointer_is_ignored_while_source_is_broken() {
        let mut session = session();
        session.set_source("[");
        let prevent = session.pointer_down(
            MouseEvent::new(Point::new(10.0, 10.0), Some(MouseButton::Right)),
            Instant::now(),
        );
        assert!(!prevent);
        assert_eq!(session.source(), "[");
    }
}
