// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session - binds a point list to its source document
//!
//! The session owns the source text, the points parsed from it, the undo
//! history and the pointer state. Edits flow one way: a new point list is
//! patched into the text, and the points are then re-read from the text,
//! so what the canvas shows is always exactly what the document holds.

mod keyboard;
mod pointer;

use super::debounce::Debouncer;
use super::edit_types::EditType;
use super::interaction::InteractionController;
use super::undo::UndoState;
use super::viewport::ViewPort;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::model::{parse_source, patch_source_stepwise};
use crate::path::SplinePoint;
use crate::path::point_list::is_ordered;
use crate::settings;
use kurbo::Size;
use std::time::Instant;

/// Document a new session starts with
pub const DEFAULT_SOURCE: &str = r#"{
  "type": "minecraft:spline",
  "spline": {
    "coordinate": "minecraft:overworld/continents",
    "points": [
      {
        "location": 0,
        "value": 0,
        "derivative": 0
      },
      {
        "location": 0.23,
        "value": 0.8,
        "derivative": 0.3
      },
      {
        "location": 0.4,
        "value": 0.2,
        "derivative": -0.4
      }
    ]
  }
}"#;

/// A written text waiting to enter the history
#[derive(Debug, Clone, PartialEq)]
struct PendingCommit {
    text: String,
    /// Replace the current history entry instead of adding one
    replace: bool,
}

/// Editing session for one document
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Live source text; ahead of the history while a commit is pending
    source: String,

    /// Points read from `source`; empty while it has errors
    points: Vec<SplinePoint>,

    /// Per point: whether its value may be written back
    editable: Vec<bool>,

    /// Human-readable parse errors; editing is off while non-empty
    errors: Vec<String>,

    history: UndoState<String>,
    pending: Debouncer<PendingCommit>,

    /// Type of the last applied edit, for drag grouping
    last_edit: Option<EditType>,

    /// Rendering surface size in device pixels
    surface: Size,

    interaction: InteractionController,
    config: EditorConfig,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, EditorConfig::default())
    }
}

impl EditSession {
    pub fn new(source: impl Into<String>, config: EditorConfig) -> Self {
        let source = source.into();
        let mut session = Self {
            history: UndoState::new(source.clone(), config.history_limit),
            pending: Debouncer::new(config.commit_delay()),
            source,
            points: Vec::new(),
            editable: Vec::new(),
            errors: Vec::new(),
            last_edit: None,
            surface: Size::new(1.0, 1.0),
            interaction: InteractionController::new(config.hit_slop_px),
            config,
        };
        session.reload();
        session
    }

    /// Read the points of a source text, or the error that prevents it
    pub fn parse(text: &str) -> (Vec<SplinePoint>, Vec<String>) {
        match parse_source(text) {
            Ok(located) => (located.points, Vec::new()),
            Err(e) => (Vec::new(), vec![e.to_string()]),
        }
    }

    /// Re-read points from the live source text
    fn reload(&mut self) {
        match parse_source(&self.source) {
            Ok(located) => {
                self.points = located.points;
                self.editable = located.editable;
                self.errors.clear();
            }
            Err(e) => {
                tracing::debug!("[EditSession] source not editable: {e}");
                self.points.clear();
                self.editable.clear();
                self.errors = vec![e.to_string()];
            }
        }
        self.interaction.sync_len(self.points.len());
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn points(&self) -> &[SplinePoint] {
        &self.points
    }

    pub fn editable(&self) -> &[bool] {
        &self.editable
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_editable(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_surface_size(&mut self, surface: Size) {
        self.surface = surface;
    }

    /// Viewport framing the current points on the current surface
    pub fn viewport(&self) -> ViewPort {
        ViewPort::for_points(&self.points).with_surface(self.surface)
    }

    pub fn has_pending_commit(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.pending.is_pending()
    }

    pub fn can_redo(&self) -> bool {
        !self.pending.is_pending() && self.history.can_redo()
    }

    /// Replace the source text, as typed by the user. Always recorded in
    /// the history, even if the new text does not parse.
    pub fn set_source(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.flush();
        if text == self.source {
            return;
        }
        self.history.push(text.clone());
        self.source = text;
        self.last_edit = None;
        self.reload();
    }

    /// Write an edited point list into the source as a discrete edit
    pub fn apply_edit(&mut self, points: &[SplinePoint]) -> String {
        self.apply_edit_at(points, EditType::Normal, Instant::now())
    }

    /// Write an edited point list into the source.
    ///
    /// Returns the new text, or the unchanged text when editing is off or
    /// the edit was dropped.
    pub fn apply_edit_at(
        &mut self,
        points: &[SplinePoint],
        edit_type: EditType,
        now: Instant,
    ) -> String {
        if !self.is_editable() {
            tracing::debug!("[EditSession] edit ignored, source has errors");
            return self.source.clone();
        }
        let text = match self.write_points(points) {
            Ok(text) => text,
            Err(e) if e.blocks_editing() => {
                tracing::warn!("[EditSession] source no longer editable: {e}");
                self.errors = vec![e.to_string()];
                return self.source.clone();
            }
            Err(e) => {
                tracing::warn!("[EditSession] edit dropped: {e}");
                return self.source.clone();
            }
        };
        if text == self.source {
            return text;
        }

        let replace = edit_type.continues(self.last_edit);
        self.last_edit = Some(edit_type);
        self.source = text.clone();
        self.reload();

        if self.config.debounce {
            let merged = match self.pending.cancel() {
                // keep the group's first decision while it is still pending
                Some(prev) if replace => PendingCommit {
                    text: text.clone(),
                    replace: prev.replace,
                },
                Some(prev) => {
                    self.commit(prev);
                    PendingCommit {
                        text: text.clone(),
                        replace,
                    }
                }
                None => PendingCommit {
                    text: text.clone(),
                    replace,
                },
            };
            self.pending.schedule(merged, now);
        } else {
            self.commit(PendingCommit {
                text: text.clone(),
                replace,
            });
        }
        text
    }

    /// Close the current drag group
    pub fn finish_drag(&mut self) {
        if self.last_edit == Some(EditType::Drag) {
            self.last_edit = Some(EditType::DragUp);
        }
    }

    /// Patch `points` into the source. An ambiguous edit that keeps the
    /// point count is retried one point at a time instead of failing.
    fn write_points(&self, points: &[SplinePoint]) -> EditorResult<String> {
        if points.len() < settings::editing::MIN_POINTS {
            return Err(EditorError::InvariantViolation(format!(
                "{} points, at least {} required",
                points.len(),
                settings::editing::MIN_POINTS
            )));
        }
        if !is_ordered(points) {
            return Err(EditorError::InvariantViolation(
                "locations must not decrease".to_string(),
            ));
        }
        patch_source_stepwise(&self.source, points)
    }

    fn commit(&mut self, commit: PendingCommit) {
        tracing::info!(
            "[EditSession] commit ({} bytes, replace={})",
            commit.text.len(),
            commit.replace
        );
        if commit.replace {
            self.history.update_current(commit.text);
        } else {
            self.history.push(commit.text);
        }
    }

    /// Commit a pending edit whose delay has passed. Returns whether one
    /// was committed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending.poll(now) {
            Some(commit) => {
                self.commit(commit);
                true
            }
            None => false,
        }
    }

    /// Commit a pending edit right away
    pub fn flush(&mut self) {
        if let Some(commit) = self.pending.cancel() {
            self.commit(commit);
        }
    }

    fn restore(&mut self, text: String) {
        self.source = text;
        self.last_edit = None;
        self.reload();
    }

    pub fn undo(&mut self) -> bool {
        self.flush();
        let Some(text) = self.history.undo().cloned() else {
            return false;
        };
        tracing::debug!("[EditSession] undo");
        self.restore(text);
        true
    }

    pub fn redo(&mut self) -> bool {
        self.flush();
        let Some(text) = self.history.redo().cloned() else {
            return false;
        };
        tracing::debug!("[EditSession] redo");
        self.restore(text);
        true
    }
}
