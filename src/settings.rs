// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor settings and configuration constants.
//!
//! These are the compiled-in defaults. Values that make sense to change
//! per user (debouncing, history depth, hit slop) can be overridden at
//! runtime through `config::EditorConfig`.

// ============================================================================
// REGION SETTINGS
// ============================================================================
/// Horizontal margin added around the point bounding box (domain units)
const REGION_MARGIN_X: f64 = 0.2;

/// Vertical margin added around the point bounding box (domain units)
const REGION_MARGIN_Y: f64 = 1.0;

// ============================================================================
// VIEW SIZING
// ============================================================================
// All sizes below are multiples of SIZE_UNIT, measured in the normalized
// unit square, so they stay the same on screen whatever the region.

/// One size step in unit space (1% of the canvas)
const SIZE_UNIT: f64 = 0.01;

/// Point anchor radius (size steps)
const POINT_RADIUS: f64 = 2.0;

/// Handle knob radius (size steps)
const HANDLE_RADIUS: f64 = 1.5;

/// Distance from anchor to handle knob (size steps)
const HANDLE_LENGTH: f64 = 8.0;

/// Curve and handle stroke width (size steps)
const STROKE_WIDTH: f64 = 1.0;

/// Lower bound for anchor-to-control distances when rescaling handles
const MIN_HANDLE_DISTANCE: f64 = 0.0001;

// ============================================================================
// AXIS SETTINGS
// ============================================================================
/// Number of ticks drawn along the zero axis
const AXIS_TICK_COUNT: usize = 100;

/// Domain distance between ticks
const AXIS_TICK_SPACING: f64 = 0.1;

/// Domain x of the first tick
const AXIS_TICK_START: f64 = -5.0;

/// Every Nth tick is a major tick
const AXIS_MAJOR_EVERY: usize = 10;

/// Major / minor tick length (size steps)
const AXIS_MAJOR_LENGTH: f64 = 3.0;
const AXIS_MINOR_LENGTH: f64 = 1.5;

// ============================================================================
// EDITING SETTINGS
// ============================================================================
/// A spline never has fewer points than this
const MIN_POINTS: usize = 2;

/// Slopes that overflow are clamped to +/- this value
const SLOPE_LIMIT: f64 = 1000.0;

/// Written numbers are truncated to 1 / ROUNDING_SCALE
const ROUNDING_SCALE: f64 = 1000.0;

/// Extra pointer slop for hit testing (device pixels)
const HIT_SLOP_PX: f64 = 2.0;

// ============================================================================
// COMMIT / HISTORY SETTINGS
// ============================================================================
/// Whether edits are collapsed into one delayed write
const DEBOUNCE_ENABLED: bool = true;

/// Delay before a pending edit is written (milliseconds)
const COMMIT_DELAY_MS: u64 = 100;

/// Maximum number of source snapshots kept for undo
const HISTORY_LIMIT: usize = 500;

// ============================================================================
// FILE WATCHING
// ============================================================================
/// Quiet period before an external change is reported (milliseconds)
const WATCH_DEBOUNCE_MS: u64 = 1000;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Region construction around the points
pub mod region {
    /// Horizontal margin (domain units)
    pub const MARGIN_X: f64 = super::REGION_MARGIN_X;

    /// Vertical margin (domain units)
    pub const MARGIN_Y: f64 = super::REGION_MARGIN_Y;
}

/// Zoom-independent sizes, in size steps of `SIZE_UNIT`
pub mod view {
    pub const SIZE_UNIT: f64 = super::SIZE_UNIT;
    pub const POINT_RADIUS: f64 = super::POINT_RADIUS;
    pub const HANDLE_RADIUS: f64 = super::HANDLE_RADIUS;
    pub const HANDLE_LENGTH: f64 = super::HANDLE_LENGTH;
    pub const STROKE_WIDTH: f64 = super::STROKE_WIDTH;
    pub const MIN_HANDLE_DISTANCE: f64 = super::MIN_HANDLE_DISTANCE;
}

/// Tick layout along the zero axis
pub mod axis {
    pub const TICK_COUNT: usize = super::AXIS_TICK_COUNT;
    pub const TICK_SPACING: f64 = super::AXIS_TICK_SPACING;
    pub const TICK_START: f64 = super::AXIS_TICK_START;
    pub const MAJOR_EVERY: usize = super::AXIS_MAJOR_EVERY;
    pub const MAJOR_LENGTH: f64 = super::AXIS_MAJOR_LENGTH;
    pub const MINOR_LENGTH: f64 = super::AXIS_MINOR_LENGTH;
}

/// Point list editing rules
pub mod editing {
    /// Minimum number of points in a spline
    pub const MIN_POINTS: usize = super::MIN_POINTS;

    /// Clamp applied to overflowing slopes
    pub const SLOPE_LIMIT: f64 = super::SLOPE_LIMIT;

    /// Truncation scale for written numbers (3 decimals)
    pub const ROUNDING_SCALE: f64 = super::ROUNDING_SCALE;

    /// Default pointer slop (device pixels)
    pub const HIT_SLOP_PX: f64 = super::HIT_SLOP_PX;
}

/// Commit debouncing and undo history defaults
pub mod commit {
    pub const DEBOUNCE_ENABLED: bool = super::DEBOUNCE_ENABLED;
    pub const DELAY_MS: u64 = super::COMMIT_DELAY_MS;
    pub const HISTORY_LIMIT: usize = super::HISTORY_LIMIT;
}

/// File watching for the command line tool
pub mod watch {
    /// Quiet period before reloading (milliseconds)
    pub const DEBOUNCE_MS: u64 = super::WATCH_DEBOUNCE_MS;
}
