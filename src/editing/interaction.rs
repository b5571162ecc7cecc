// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer gestures on the spline canvas.
//!
//! `InteractionController` turns mouse events into point-list edits. It
//! never mutates the list it is given: every edit comes back as a new
//! `Vec` in an `Outcome`, tagged with the `EditType` the session should use
//! for undo grouping. The controller owns the selection and the gesture
//! state between events.

use super::edit_types::EditType;
use super::hit_test::{HitTarget, find_closest};
use super::mouse::{MouseButton, MouseEvent};
use super::selection::Selection;
use super::viewport::ViewPort;
use crate::path::point_list::{insert_point, remove_point, set_slope, translate_group};
use crate::path::{SplinePoint, safe_slope};
use crate::settings;
use kurbo::{Point, Rect, Vec2};

/// Gesture in progress
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Dragging point `index`; `group` holds every moved point with its
    /// offset from the grabbed one
    DraggingPoint {
        index: usize,
        group: Vec<(usize, Vec2)>,
    },
    /// Dragging the tangent handle of point `index`
    DraggingHandle { index: usize },
    /// Rubber-band selection, corners in domain space
    BoxSelecting { anchor: Point, current: Point },
}

/// What an event did to the point list
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Unchanged,
    Edited {
        points: Vec<SplinePoint>,
        edit_type: EditType,
    },
    /// A drag was released; pending drag edits can be committed
    DragFinished,
}

/// Result of a button press
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub outcome: Outcome,
    /// The host should suppress its default handling (the context menu)
    pub prevent_default: bool,
}

impl Response {
    fn primary(outcome: Outcome) -> Self {
        Self {
            outcome,
            prevent_default: false,
        }
    }

    fn secondary(outcome: Outcome) -> Self {
        Self {
            outcome,
            prevent_default: true,
        }
    }
}

/// Slope of the line from `anchor` to `pos`, kept finite
fn slope_towards(anchor: &SplinePoint, pos: Point) -> f64 {
    safe_slope((pos.y - anchor.y) / (pos.x - anchor.x))
}

/// Pointer state machine for one canvas
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    selection: Selection,
    hit_slop_px: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(settings::editing::HIT_SLOP_PX)
    }
}

impl InteractionController {
    pub fn new(hit_slop_px: f64) -> Self {
        Self {
            state: InteractionState::Idle,
            selection: Selection::new(),
            hit_slop_px,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.state,
            InteractionState::DraggingPoint { .. } | InteractionState::DraggingHandle { .. }
        )
    }

    /// Live rubber-band rectangle in domain space, normalized
    pub fn selection_rect(&self) -> Option<Rect> {
        match self.state {
            InteractionState::BoxSelecting { anchor, current } => {
                Some(Rect::from_points(anchor, current))
            }
            _ => None,
        }
    }

    /// Drop selected indices past the end of a list of `len` points
    pub fn sync_len(&mut self, len: usize) {
        self.selection = self.selection.retain_below(len);
    }

    fn hit(&self, points: &[SplinePoint], viewport: &ViewPort, event: &MouseEvent) -> HitTarget {
        let unit = viewport.device_to_unit(event.pos);
        let slop = viewport.device_len_to_unit(self.hit_slop_px);
        find_closest(points, viewport, unit, slop)
    }

    pub fn pointer_down(
        &mut self,
        points: &[SplinePoint],
        viewport: &ViewPort,
        event: MouseEvent,
    ) -> Response {
        if self.state != InteractionState::Idle {
            tracing::debug!("[interaction] press during {:?}, resetting", self.state);
            self.state = InteractionState::Idle;
        }
        let target = self.hit(points, viewport, &event);
        let pos = viewport.device_to_domain(event.pos);
        match event.button {
            Some(MouseButton::Left) => {
                Response::primary(self.primary_down(points, target, pos, &event))
            }
            Some(MouseButton::Right) => Response::secondary(self.secondary_down(points, target)),
            _ => Response::primary(Outcome::Unchanged),
        }
    }

    fn primary_down(
        &mut self,
        points: &[SplinePoint],
        target: HitTarget,
        pos: Point,
        event: &MouseEvent,
    ) -> Outcome {
        match target {
            HitTarget::Point(index) => {
                if event.mods.shift {
                    self.selection.insert(index);
                } else if !self.selection.contains(index) {
                    self.selection = Selection::single(index);
                }
                let grabbed = points[index].position();
                let group = self
                    .selection
                    .iter()
                    .filter_map(|i| points.get(i).map(|p| (i, p.position() - grabbed)))
                    .collect();
                self.state = InteractionState::DraggingPoint { index, group };
                tracing::debug!("[interaction] drag point {index}");
                self.drag_to(points, pos)
            }
            HitTarget::Handle(index) => {
                self.state = InteractionState::DraggingHandle { index };
                tracing::debug!("[interaction] drag handle of point {index}");
                self.drag_to(points, pos)
            }
            HitTarget::Curve => {
                let (edited, index) = insert_point(points, SplinePoint::new(pos.x, pos.y, 0.0));
                self.selection = self.selection.shift_after_insertion(index);
                tracing::debug!("[interaction] split at index {index}");
                Outcome::Edited {
                    points: edited,
                    edit_type: EditType::Normal,
                }
            }
            HitTarget::Empty => {
                self.selection.clear();
                self.state = InteractionState::BoxSelecting {
                    anchor: pos,
                    current: pos,
                };
                Outcome::Unchanged
            }
        }
    }

    fn secondary_down(&mut self, points: &[SplinePoint], target: HitTarget) -> Outcome {
        let index = match target {
            HitTarget::Point(index) if points[index].slope == 0.0 => {
                let Some(edited) = remove_point(points, index) else {
                    return Outcome::Unchanged;
                };
                self.selection = self.selection.shift_after_removal(index);
                tracing::debug!("[interaction] delete point {index}");
                return Outcome::Edited {
                    points: edited,
                    edit_type: EditType::Normal,
                };
            }
            HitTarget::Point(index) | HitTarget::Handle(index) => index,
            HitTarget::Curve | HitTarget::Empty => return Outcome::Unchanged,
        };
        if points[index].slope == 0.0 {
            return Outcome::Unchanged;
        }
        tracing::debug!("[interaction] flatten point {index}");
        Outcome::Edited {
            points: set_slope(points, index, 0.0),
            edit_type: EditType::Normal,
        }
    }

    /// Apply the current drag for a pointer at domain position `pos`
    fn drag_to(&self, points: &[SplinePoint], pos: Point) -> Outcome {
        let edited = match &self.state {
            InteractionState::DraggingPoint { index, group } if *index < points.len() => {
                translate_group(points, *index, pos, group)
            }
            InteractionState::DraggingHandle { index } => match points.get(*index) {
                Some(anchor) => set_slope(points, *index, slope_towards(anchor, pos)),
                None => return Outcome::Unchanged,
            },
            _ => return Outcome::Unchanged,
        };
        Outcome::Edited {
            points: edited,
            edit_type: EditType::Drag,
        }
    }

    pub fn pointer_move(
        &mut self,
        points: &[SplinePoint],
        viewport: &ViewPort,
        event: MouseEvent,
    ) -> Outcome {
        let pos = viewport.device_to_domain(event.pos);
        if let InteractionState::BoxSelecting { current, .. } = &mut self.state {
            *current = pos;
            return Outcome::Unchanged;
        }
        self.drag_to(points, pos)
    }

    pub fn pointer_up(
        &mut self,
        points: &[SplinePoint],
        viewport: &ViewPort,
        event: MouseEvent,
    ) -> Outcome {
        let pos = viewport.device_to_domain(event.pos);
        match std::mem::take(&mut self.state) {
            InteractionState::BoxSelecting { anchor, .. } => {
                let rect = Rect::from_points(anchor, pos);
                self.selection = if rect.width() == 0.0 || rect.height() == 0.0 {
                    Selection::new()
                } else {
                    Selection::from_indices(points.iter().enumerate().filter_map(|(i, p)| {
                        let inside = rect.x0 <= p.x
                            && p.x <= rect.x1
                            && rect.y0 <= p.y
                            && p.y <= rect.y1;
                        inside.then_some(i)
                    }))
                };
                tracing::debug!("[interaction] box selected {} points", self.selection.len());
                Outcome::Unchanged
            }
            InteractionState::DraggingPoint { .. } | InteractionState::DraggingHandle { .. } => {
                Outcome::DragFinished
            }
            InteractionState::Idle => Outcome::Unchanged,
        }
    }

    /// Abandon the current gesture, e.g. when the pointer leaves the canvas
    pub fn cancel(&mut self) -> Outcome {
        let was_dragging = self.is_dragging();
        self.state = InteractionState::Idle;
        if was_dragging {
            Outcome::DragFinished
        } else {
            Outcome::Unchanged
        }
    }
}
