// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Spline control points.

use crate::settings;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A control point: position plus tangent slope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplinePoint {
    /// Location along the input coordinate
    pub x: f64,
    /// Output value at `x`
    pub y: f64,
    /// Derivative at `x`
    pub slope: f64,
}

impl SplinePoint {
    pub const fn new(x: f64, y: f64, slope: f64) -> Self {
        Self { x, y, slope }
    }

    /// The point's position, ignoring its slope
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Keep derived values finite: NaN becomes 0, infinities become
/// +/- `SLOPE_LIMIT`.
pub fn safe_slope(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else if value.is_finite() {
        value
    } else {
        settings::editing::SLOPE_LIMIT.copysign(value)
    }
}
