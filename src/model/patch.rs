// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Writing an edited point list back into its document.
//!
//! Only the points array of the located spline is replaced. Inside it,
//! source points are matched to edited points by location rather than by
//! index, because gestures insert and remove points: two cursors walk the
//! old and new lists and each step is classified as a match, an
//! insertion, a removal or an in-place update. When none of those fit the
//! edit is refused and the document is left as it was.
//!
//! Unchanged points are copied verbatim, fields and all. A point whose
//! `value` is a nested node is never rewritten.

use super::locate::{locate, parse_document};
use super::node::keys;
use crate::error::{EditorError, EditorResult};
use crate::path::{SplinePoint, safe_slope};
use crate::settings;
use serde_json::{Map, Number, Value};

/// Largest magnitude at which every integer is exactly representable
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Truncate toward negative infinity at three decimals
pub fn truncate(value: f64) -> f64 {
    let scale = settings::editing::ROUNDING_SCALE;
    (value * scale).floor() / scale
}

/// JSON number for a written field. Integral values are written without a
/// fractional part; non-finite values are clamped first.
fn number(value: f64) -> Value {
    let value = truncate(safe_slope(value));
    if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map_or(Value::from(0), Value::Number)
    }
}

/// A fresh `{location, value, derivative}` object for an edited point
fn rewrite(point: &SplinePoint) -> Value {
    let mut obj = Map::new();
    obj.insert(keys::LOCATION.to_string(), number(point.x));
    obj.insert(keys::VALUE.to_string(), number(point.y));
    obj.insert(keys::DERIVATIVE.to_string(), number(point.slope));
    Value::Object(obj)
}

fn numeric_value(source: &Value) -> Option<f64> {
    source.get(keys::VALUE).and_then(Value::as_f64)
}

fn is_editable(source: &Value) -> bool {
    numeric_value(source).is_some()
}

/// Source point at a matching location: rewrite only if it is editable
/// and its value or derivative actually changed.
fn update(source: &Value, edited: &SplinePoint) -> Value {
    let Some(value) = numeric_value(source) else {
        return source.clone();
    };
    let derivative = source
        .get(keys::DERIVATIVE)
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    if value != edited.y || derivative != edited.slope {
        rewrite(edited)
    } else {
        source.clone()
    }
}

/// Align `new` against the source points array and build its replacement.
///
/// Neighbour lookups past either end yield `None`, and two missing
/// neighbours compare equal; that is what makes the last point movable.
pub fn reconcile(old: &[Value], new: &[SplinePoint]) -> EditorResult<Vec<Value>> {
    let old_loc = |k: usize| {
        old.get(k)
            .and_then(|p| p.get(keys::LOCATION))
            .and_then(Value::as_f64)
    };
    let new_x = |k: usize| new.get(k).map(|p| p.x);

    let mut out = Vec::with_capacity(new.len());
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        let source = &old[i];
        let edited = &new[j];
        if old_loc(i) == new_x(j) {
            out.push(update(source, edited));
            i += 1;
            j += 1;
        } else if old_loc(i) == new_x(j + 1) {
            // inserted before the current source point
            out.push(rewrite(edited));
            j += 1;
        } else if old_loc(i + 1) == new_x(j) {
            // source point removed
            i += 1;
        } else if old_loc(i + 1) == new_x(j + 1) {
            // moved in place
            if is_editable(source) {
                out.push(rewrite(edited));
            } else {
                out.push(source.clone());
            }
            i += 1;
            j += 1;
        } else {
            return Err(EditorError::ReconciliationAmbiguous {
                old_index: i,
                new_index: j,
            });
        }
    }
    // Trailing source points were removed, trailing edits were appended.
    out.extend(new[j..].iter().map(rewrite));
    Ok(out)
}

/// Replace the located spline's points with `new_points`
pub fn patch(document: &Value, new_points: &[SplinePoint]) -> EditorResult<Value> {
    let located = locate(document).ok_or(EditorError::StructureNotFound)?;
    let old = document
        .pointer(&located.pointer)
        .and_then(Value::as_array)
        .ok_or(EditorError::StructureNotFound)?;
    let replacement = reconcile(old, new_points)?;

    let mut patched = document.clone();
    if let Some(target) = patched.pointer_mut(&located.pointer) {
        *target = Value::Array(replacement);
    }
    Ok(patched)
}

/// Apply an edit that moves several points at once, one point at a time.
///
/// Moving two neighbours together leaves no unchanged neighbour to anchor
/// on, so `patch` refuses it. When the point count is unchanged, each
/// changed point is written in its own patch, starting from the end the
/// points move towards, so every step is a single in-place update.
pub fn patch_stepwise(document: &Value, new_points: &[SplinePoint]) -> EditorResult<Value> {
    let old = locate(document)
        .ok_or(EditorError::StructureNotFound)?
        .points;
    if old.len() != new_points.len() {
        return patch(document, new_points);
    }

    let mut order: Vec<usize> = (0..old.len())
        .filter(|&k| old[k] != new_points[k])
        .collect();
    let moving_right = order
        .first()
        .is_some_and(|&k| new_points[k].x > old[k].x);
    if moving_right {
        order.reverse();
    }

    let mut current = document.clone();
    for k in order {
        let mut step = locate(&current)
            .ok_or(EditorError::StructureNotFound)?
            .points;
        if step.len() != new_points.len() {
            return Err(EditorError::ReconciliationAmbiguous {
                old_index: k,
                new_index: k,
            });
        }
        step[k] = new_points[k];
        current = patch(&current, &step)?;
    }
    Ok(current)
}

/// Parse, patch and pretty-print source text
pub fn patch_source(text: &str, new_points: &[SplinePoint]) -> EditorResult<String> {
    let document = parse_document(text)?;
    let patched = patch(&document, new_points)?;
    Ok(serde_json::to_string_pretty(&patched)?)
}

/// Like `patch_source`, falling back to `patch_stepwise` when the direct
/// alignment is ambiguous
pub fn patch_source_stepwise(text: &str, new_points: &[SplinePoint]) -> EditorResult<String> {
    let document = parse_document(text)?;
    let patched = match patch(&document, new_points) {
        Err(EditorError::ReconciliationAmbiguous { .. }) => {
            patch_stepwise(&document, new_points)?
        }
        other => other?,
    };
    Ok(serde_json::to_string_pretty(&patched)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spline(points: Value) -> Value {
        json!({
            "type": "minecraft:spline",
            "spline": {
                "coordinate": "minecraft:overworld/continents",
                "points": points,
            },
        })
    }

    fn points_of(doc: &Value) -> Vec<SplinePoint> {
        locate(doc).unwrap().points
    }

    fn pts(list: &[(f64, f64, f64)]) -> Vec<SplinePoint> {
        list.iter()
            .map(|&(x, y, s)| SplinePoint::new(x, y, s))
            .collect()
    }

    #[test]
    fn truncation_rounds_down() {
        assert_eq!(truncate(0.1239), 0.123);
        assert_eq!(truncate(-0.0005), -0.001);
        assert_eq!(truncate(2.0), 2.0);
    }

    #[test]
    fn integral_numbers_written_as_integers() {
        assert_eq!(number(1.0).to_string(), "1");
        assert_eq!(number(-0.0).to_string(), "0");
        assert_eq!(number(0.5).to_string(), "0.5");
        assert_eq!(number(f64::INFINITY).to_string(), "1000");
    }

    #[test]
    fn insertion_between_two_points() {
        let doc = spline(json!([
            {"location": 0, "value": 0, "derivative": 0},
            {"location": 1, "value": 1, "derivative": 0},
        ]));
        let edited = pts(&[(0.0, 0.0, 0.0), (0.5, 0.5, 0.0), (1.0, 1.0, 0.0)]);
        let patched = patch(&doc, &edited).unwrap();
        let array = patched.pointer("/spline/points").unwrap().as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array[0], json!({"location": 0, "value": 0, "derivative": 0}));
        assert_eq!(array[2], json!({"location": 1, "value": 1, "derivative": 0}));
        assert_eq!(points_of(&patched)[1], SplinePoint::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn unchanged_points_keep_extra_fields() {
        let doc = spline(json!([
            {"location": 0, "value": 0, "derivative": 0, "comment": "keep me"},
            {"location": 1, "value": 1},
        ]));
        let edited = pts(&[(0.0, 0.0, 0.0), (1.0, 2.0, 0.0)]);
        let patched = patch(&doc, &edited).unwrap();
        assert_eq!(
            patched.pointer("/spline/points/0/comment"),
            Some(&json!("keep me"))
        );
        assert_eq!(
            patched.pointer("/spline/points/1"),
            Some(&json!({"location": 1, "value": 2, "derivative": 0}))
        );
    }

    #[test]
    fn only_the_located_spline_is_rewritten() {
        let doc = json!({
            "type": "minecraft:add",
            "argument1": {"type": "minecraft:constant", "argument": 0.25},
            "argument2": spline(json!([
                {"location": -1, "value": 0.5},
                {"location": 1, "value": 1.5},
            ])),
        });
        let edited = pts(&[(-1.0, 0.5, 0.0), (0.0, 1.0, 0.0), (1.0, 1.5, 0.0)]);
        let patched = patch(&doc, &edited).unwrap();
        assert_eq!(patched["argument1"], doc["argument1"]);
        assert_eq!(patched["type"], doc["type"]);
        assert_eq!(
            patched["argument2"]["spline"]["coordinate"],
            doc["argument2"]["spline"]["coordinate"]
        );
        assert_eq!(points_of(&patched), edited);
    }

    #[test]
    fn nested_values_are_never_rewritten() {
        let nested = json!({"coordinate": "minecraft:overworld/erosion", "points": []});
        let doc = spline(json!([
            {"location": 0, "value": nested.clone(), "derivative": 0},
            {"location": 1, "value": 1, "derivative": 0},
        ]));
        // y/slope changes on the locked point, in place
        let edited = pts(&[(0.0, 3.0, 2.0), (1.0, 1.0, 0.0)]);
        let patched = patch(&doc, &edited).unwrap();
        assert_eq!(patched.pointer("/spline/points/0/value"), Some(&nested));
        assert_eq!(patched.pointer("/spline/points/0/derivative"), Some(&json!(0)));

        // x drag of the locked point is dropped too
        let edited = pts(&[(0.5, 3.0, 2.0), (1.0, 1.0, 0.0)]);
        let patched = patch(&doc, &edited).unwrap();
        assert_eq!(patched.pointer("/spline/points/0"), doc.pointer("/spline/points/0"));
    }

    #[test]
    fn removal_drops_source_point() {
        let doc = spline(json!([
            {"location": 0, "value": 0},
            {"location": 1, "value": 1},
            {"location": 2, "value": 0},
        ]));
        let edited = pts(&[(0.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
        let patched = patch(&doc, &edited).unwrap();
        assert_eq!(points_of(&patched), edited);
        assert_eq!(
            patched.pointer("/spline/points/1"),
            Some(&json!({"location": 2, "value": 0}))
        );
    }

    #[test]
    fn trailing_removal_and_append() {
        let doc = spline(json!([
            {"location": 0, "value": 0},
            {"location": 1, "value": 1},
            {"location": 2, "value": 0},
        ]));
        let shorter = pts(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0)]);
        assert_eq!(points_of(&patch(&doc, &shorter).unwrap()), shorter);

        let longer = pts(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0), (2.0, 0.0, 0.0), (3.0, 1.0, 0.0)]);
        assert_eq!(points_of(&patch(&doc, &longer).unwrap()), longer);
    }

    #[test]
    fn dragging_middle_and_last_points() {
        let doc = spline(json!([
            {"location": 0, "value": 0},
            {"location": 1, "value": 1},
            {"location": 2, "value": 0},
        ]));
        let middle = pts(&[(0.0, 0.0, 0.0), (1.25, 0.75, 0.0), (2.0, 0.0, 0.0)]);
        assert_eq!(points_of(&patch(&doc, &middle).unwrap()), middle);

        let last = pts(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0), (2.5, -0.5, 0.0)]);
        assert_eq!(points_of(&patch(&doc, &last).unwrap()), last);
    }

    #[test]
    fn round_trip_is_truncated() {
        let doc = spline(json!([
            {"location": 0, "value": 0},
            {"location": 1, "value": 1},
        ]));
        let edited = pts(&[(0.0, 0.0, 0.0), (0.12345, 0.6789, -1.23456), (1.0, 1.0, 0.0)]);
        let located = points_of(&patch(&doc, &edited).unwrap());
        let expected: Vec<SplinePoint> = edited
            .iter()
            .map(|p| SplinePoint::new(truncate(p.x), truncate(p.y), truncate(p.slope)))
            .collect();
        assert_eq!(located, expected);
        assert_eq!(located[1], SplinePoint::new(0.123, 0.678, -1.235));
    }

    #[test]
    fn crossing_edits_are_refused() {
        let doc = spline(json!([
            {"location": 0, "value": 0},
            {"location": 1, "value": 1},
            {"location": 2, "value": 0},
            {"location": 3, "value": 1},
        ]));
        let edited = pts(&[(0.0, 0.0, 0.0), (1.5, 1.0, 0.0), (2.5, 0.0, 0.0), (3.0, 1.0, 0.0)]);
        let err = patch(&doc, &edited).unwrap_err();
        assert!(matches!(
            err,
            EditorError::ReconciliationAmbiguous {
                old_index: 1,
                new_index: 1
            }
        ));
    }

    #[test]
    fn stepwise_applies_group_moves() {
        let doc = spline(json!([
            {"location": 0, "value": 0},
            {"location": 1, "value": 1},
            {"location": 2, "value": 0},
            {"location": 3, "value": 1},
        ]));
        let right = pts(&[(0.0, 0.0, 0.0), (1.5, 1.0, 0.0), (2.5, 0.0, 0.0), (3.0, 1.0, 0.0)]);
        assert_eq!(points_of(&patch_stepwise(&doc, &right).unwrap()), right);

        let left = pts(&[(0.0, 0.0, 0.0), (0.5, 1.0, 0.0), (1.5, 0.0, 0.0), (3.0, 1.0, 0.0)]);
        assert_eq!(points_of(&patch_stepwise(&doc, &left).unwrap()), left);
    }

    #[test]
    fn untouched_text_survives_patch_source() {
        let text = r#"{
  "type": "minecraft:add",
  "argument1": {
    "type": "minecraft:noise",
    "noise": "minecraft:ridge",
    "xz_scale": 1.0,
    "y_scale": 1e-3
  },
  "argument2": {
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
          "location": 1,
          "value": 1,
          "derivative": 0
        }
      ]
    }
  }
}"#;
        let unchanged = patch_source(text, &pts(&[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0)])).unwrap();
        assert_eq!(unchanged, text);

        let edited = patch_source(text, &pts(&[(0.0, 0.0, 0.0), (1.0, 0.5, 0.0)])).unwrap();
        assert!(edited.contains("\"xz_scale\": 1.0"));
        assert!(edited.contains("\"y_scale\": 1e-3"));
        assert!(edited.contains("\"value\": 0.5"));
    }

    #[test]
    fn patch_source_reports_syntax_errors() {
        assert!(matches!(
            patch_source("[", &[]),
            Err(EditorError::Syntax(_))
        ));
    }

    #[test]
    fn stepwise_source_falls_back_only_when_ambiguous() {
        let text = serde_json::to_string_pretty(&spline(json!([
            {"location": 0, "value": 0},
            {"location": 1, "value": 1},
            {"location": 2, "value": 0},
            {"location": 3, "value": 1},
        ])))
        .unwrap();
        let edited = pts(&[(0.0, 0.0, 0.0), (1.5, 1.0, 0.0), (2.5, 0.0, 0.0), (3.0, 1.0, 0.0)]);
        assert!(patch_source(&text, &edited).is_err());
        let out = patch_source_stepwise(&text, &edited).unwrap();
        let reparsed = locate(&parse_document(&out).unwrap()).unwrap();
        assert_eq!(reparsed.points, edited);
    }
}
