// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Cubic segments between adjacent control points.

use super::point::{SplinePoint, safe_slope};
use kurbo::{CubicBez, Point};

/// The cubic between point `index` and point `index + 1`, in domain space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub bez: CubicBez,
}

impl Segment {
    /// Build the segment between two points.
    ///
    /// Control points sit a third of the way along x, raised by each
    /// end's slope. Their y goes through `safe_slope` so coincident or
    /// extreme points still give finite geometry.
    pub fn between(index: usize, prev: &SplinePoint, next: &SplinePoint) -> Self {
        let d = (next.x - prev.x) / 3.0;
        let p0 = prev.position();
        let p1 = Point::new(prev.x + d, safe_slope(prev.y + prev.slope * d));
        let p2 = Point::new(next.x - d, safe_slope(next.y - next.slope * d));
        let p3 = next.position();
        Self {
            index,
            bez: CubicBez::new(p0, p1, p2, p3),
        }
    }

    /// Index of the point this segment starts at
    pub fn start_owner(&self) -> usize {
        self.index
    }

    /// Index of the point this segment ends at
    pub fn end_owner(&self) -> usize {
        self.index + 1
    }
}

/// Segments for every adjacent pair of points
pub fn segments(points: &[SplinePoint]) -> Vec<Segment> {
    points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| Segment::between(i, &pair[0], &pair[1]))
        .collect()
}
