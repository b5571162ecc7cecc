// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Copy-on-edit operations over an ordered point list.
//!
//! Every function takes the current list by reference and returns a new
//! `Vec`; nothing here mutates a list it was handed. All of them keep `x`
//! non-decreasing by clamping a moved point between its neighbours.

use super::point::SplinePoint;
use crate::settings;
use kurbo::{Point, Vec2};

/// Partial update for one point; `None` fields keep their value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointEdit {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub slope: Option<f64>,
}

impl PointEdit {
    pub fn position(pos: Point) -> Self {
        Self {
            x: Some(pos.x),
            y: Some(pos.y),
            slope: None,
        }
    }

    pub fn slope(slope: f64) -> Self {
        Self {
            slope: Some(slope),
            ..Self::default()
        }
    }
}

/// Whether `x` never decreases along the list
pub fn is_ordered(points: &[SplinePoint]) -> bool {
    points.windows(2).all(|w| w[0].x <= w[1].x)
}

/// Clamp `x` between the neighbours of `index`
fn clamp_to_neighbours(points: &[SplinePoint], index: usize, x: f64) -> f64 {
    let min = index
        .checked_sub(1)
        .and_then(|i| points.get(i))
        .map_or(f64::NEG_INFINITY, |p| p.x);
    let max = points.get(index + 1).map_or(f64::INFINITY, |p| p.x);
    x.max(min).min(max)
}

/// Apply a partial edit to one point
pub fn edit_point(points: &[SplinePoint], index: usize, edit: PointEdit) -> Vec<SplinePoint> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i != index {
                return *p;
            }
            SplinePoint {
                x: edit
                    .x
                    .map_or(p.x, |x| clamp_to_neighbours(points, index, x)),
                y: edit.y.unwrap_or(p.y),
                slope: edit.slope.unwrap_or(p.slope),
            }
        })
        .collect()
}

/// Move one point to `pos`, clamping its `x`
pub fn move_point(points: &[SplinePoint], index: usize, pos: Point) -> Vec<SplinePoint> {
    edit_point(points, index, PointEdit::position(pos))
}

/// Replace the slope of one point
pub fn set_slope(points: &[SplinePoint], index: usize, slope: f64) -> Vec<SplinePoint> {
    edit_point(points, index, PointEdit::slope(slope))
}

/// Index at which a point at `x` belongs: before the first point whose
/// `x` is greater, or at the end.
pub fn insertion_index(points: &[SplinePoint], x: f64) -> usize {
    points
        .iter()
        .position(|p| p.x > x)
        .unwrap_or(points.len())
}

/// Insert a point in order; returns the new list and the index used
pub fn insert_point(points: &[SplinePoint], point: SplinePoint) -> (Vec<SplinePoint>, usize) {
    let index = insertion_index(points, point.x);
    let mut out = Vec::with_capacity(points.len() + 1);
    out.extend_from_slice(&points[..index]);
    out.push(point);
    out.extend_from_slice(&points[index..]);
    (out, index)
}

/// Remove a point, unless that would leave fewer than `MIN_POINTS`
pub fn remove_point(points: &[SplinePoint], index: usize) -> Option<Vec<SplinePoint>> {
    if points.len() <= settings::editing::MIN_POINTS || index >= points.len() {
        return None;
    }
    let mut out = points.to_vec();
    out.remove(index);
    Some(out)
}

/// Move a group of points so that each lands at `target + offset`.
///
/// Points are moved one at a time, starting with the one furthest along
/// the direction of travel, and each is clamped to its neighbours as they
/// stand at that moment. This lets a group slide as a block while the
/// list stays ordered.
pub fn translate_group(
    points: &[SplinePoint],
    grabbed: usize,
    target: Point,
    group: &[(usize, Vec2)],
) -> Vec<SplinePoint> {
    let Some(anchor) = points.get(grabbed) else {
        return points.to_vec();
    };
    let moving_right = target.x > anchor.x;

    let mut order: Vec<(usize, Vec2)> = group
        .iter()
        .copied()
        .filter(|(i, _)| *i < points.len())
        .collect();
    order.sort_by_key(|(i, _)| *i);
    if moving_right {
        order.reverse();
    }

    let mut out = points.to_vec();
    for (index, offset) in order {
        out = move_point(&out, index, target + offset);
    }
    out
}
