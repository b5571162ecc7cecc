// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Density-function document model

pub mod locate;
pub mod node;
pub mod patch;

pub use locate::{LocatedSpline, locate, parse_document, parse_source};
pub use node::DensityNode;
pub use patch::{patch, patch_source, patch_source_stepwise, patch_stepwise, truncate};
