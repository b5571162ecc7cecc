// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Tangent handles: the draggable representation of a point's slope.
//!
//! A handle points from an anchor towards the segment control point next
//! to it, but is rescaled to a fixed length in unit space. Zooming the
//! region therefore never makes handles tiny or huge.

use super::segment::Segment;
use crate::editing::viewport::ViewPort;
use crate::settings;
use kurbo::Point;

/// Which side of its anchor a handle sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    /// Leaves the anchor towards the next point
    Outgoing,
    /// Arrives at the anchor from the previous point
    Incoming,
}

/// A tangent handle in domain space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Index of the point whose slope this handle edits
    pub owner: usize,
    pub side: HandleSide,
    pub anchor: Point,
    pub tip: Point,
}

/// Rescale `control` so it sits `HANDLE_LENGTH` size steps from `anchor`
fn rescale(anchor: Point, control: Point, viewport: &ViewPort) -> Point {
    let length = viewport.scale(settings::view::HANDLE_LENGTH);
    let distance = viewport
        .unit_distance(anchor, control)
        .max(settings::view::MIN_HANDLE_DISTANCE);
    anchor + (control - anchor) * (length / distance)
}

/// Two handles per segment: the start point's outgoing handle and the
/// end point's incoming handle.
pub fn handles(segments: &[Segment], viewport: &ViewPort) -> Vec<Handle> {
    segments
        .iter()
        .flat_map(|s| {
            let bez = s.bez;
            [
                Handle {
                    owner: s.start_owner(),
                    side: HandleSide::Outgoing,
                    anchor: bez.p0,
                    tip: rescale(bez.p0, bez.p1, viewport),
                },
                Handle {
                    owner: s.end_owner(),
                    side: HandleSide::Incoming,
                    anchor: bez.p3,
                    tip: rescale(bez.p3, bez.p2, viewport),
                },
            ]
        })
        .collect()
}
