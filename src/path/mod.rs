// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The curve model: control points and the geometry derived from them.
//!
//! `SplinePoint` lists are the editable representation. Segments and
//! handles are recomputed from a list whenever it changes; they are never
//! stored or edited directly.

pub mod handle;
pub mod point;
pub mod point_list;
pub mod segment;

pub use handle::{Handle, HandleSide, handles};
pub use point::{SplinePoint, safe_slope};
pub use point_list::PointEdit;
pub use segment::{Segment, segments};
