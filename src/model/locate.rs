// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Finding the spline a document edits.
//!
//! The search follows the typed view in `node`: passthrough kinds descend
//! into their argument, combinators try `argument1` before `argument2`,
//! and the first spline whose points all parse wins. The result records
//! the JSON pointer of that spline's points array so a patch can later
//! address the exact same node.

use super::node::{DensityNode, keys};
use crate::error::{EditorError, EditorResult};
use crate::path::SplinePoint;
use serde_json::Value;

/// The spline found in a document
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedSpline {
    /// JSON pointer to the points array
    pub pointer: String,
    /// Parsed points, one per source point
    pub points: Vec<SplinePoint>,
    /// Per point: whether `value` is a plain number and may be rewritten
    pub editable: Vec<bool>,
}

/// Read one source point. `None` if it is malformed.
///
/// The `bool` is false when `value` is a nested node, in which case the
/// point's y reads as 0 and must never be written back.
pub fn read_point(value: &Value) -> Option<(SplinePoint, bool)> {
    let obj = value.as_object()?;
    let x = obj.get(keys::LOCATION)?.as_f64()?;
    let slope = match obj.get(keys::DERIVATIVE) {
        Some(d) => d.as_f64()?,
        None => 0.0,
    };
    let numeric = obj.get(keys::VALUE).and_then(Value::as_f64);
    Some((
        SplinePoint::new(x, numeric.unwrap_or(0.0), slope),
        numeric.is_some(),
    ))
}

/// Parse a whole points array, or nothing
fn read_points(spline: &Value) -> Option<(Vec<SplinePoint>, Vec<bool>)> {
    let array = spline.get(keys::POINTS)?.as_array()?;
    let parsed = array.iter().map(read_point).collect::<Option<Vec<_>>>()?;
    Some(parsed.into_iter().unzip())
}

fn locate_at(value: &Value, pointer: &str) -> Option<LocatedSpline> {
    match DensityNode::classify(value) {
        DensityNode::Spline { spline } => {
            let (points, editable) = read_points(spline)?;
            Some(LocatedSpline {
                pointer: format!("{pointer}/{}/{}", keys::SPLINE, keys::POINTS),
                points,
                editable,
            })
        }
        DensityNode::Unary { argument } => {
            locate_at(argument, &format!("{pointer}/{}", keys::ARGUMENT))
        }
        DensityNode::Binary {
            argument1,
            argument2,
        } => locate_at(argument1, &format!("{pointer}/{}", keys::ARGUMENT1))
            .or_else(|| locate_at(argument2, &format!("{pointer}/{}", keys::ARGUMENT2))),
        DensityNode::Opaque(_) => None,
    }
}

/// Find the first reachable spline in a document
pub fn locate(document: &Value) -> Option<LocatedSpline> {
    let located = locate_at(document, "");
    match &located {
        Some(spline) => tracing::debug!(
            "[locate] spline at '{}' with {} points",
            spline.pointer,
            spline.points.len()
        ),
        None => tracing::debug!("[locate] no spline found"),
    }
    located
}

/// Parse source text into a document
pub fn parse_document(text: &str) -> EditorResult<Value> {
    serde_json::from_str(text).map_err(|e| EditorError::Syntax(e.to_string()))
}

/// Parse source text and locate its spline
pub fn parse_source(text: &str) -> EditorResult<LocatedSpline> {
    let document = parse_document(text)?;
    locate(&document).ok_or(EditorError::StructureNotFound)
}
