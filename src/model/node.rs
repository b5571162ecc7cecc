// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Typed view over density-function JSON nodes.
//!
//! Documents are kept as `serde_json::Value` so that anything we do not
//! understand survives untouched. `DensityNode` borrows into a value and
//! tells the locator which children to follow; every kind it does not
//! know is `Opaque` and is never looked into.

use serde_json::Value;

/// Object keys used by the node kinds we traverse
pub mod keys {
    pub const TYPE: &str = "type";
    pub const SPLINE: &str = "spline";
    pub const POINTS: &str = "points";
    pub const ARGUMENT: &str = "argument";
    pub const ARGUMENT1: &str = "argument1";
    pub const ARGUMENT2: &str = "argument2";
    pub const LOCATION: &str = "location";
    pub const VALUE: &str = "value";
    pub const DERIVATIVE: &str = "derivative";
}

/// Namespace prefix that may precede a kind name
const NAMESPACE: &str = "minecraft:";

/// Kinds that wrap a single `argument` and pass it through
const UNARY_KINDS: &[&str] = &[
    "abs",
    "square",
    "cube",
    "half_negative",
    "quarter_negative",
    "squeeze",
    "interpolated",
    "flat_cache",
    "cache_2d",
    "cache_once",
    "cache_all_in_cell",
    "blend_density",
];

/// Kinds that combine `argument1` and `argument2`
const BINARY_KINDS: &[&str] = &["add", "mul", "min", "max"];

/// A density-function node, classified by its declared kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityNode<'a> {
    /// A spline node; `spline` is the object holding `points`
    Spline { spline: &'a Value },
    /// A single-argument passthrough
    Unary { argument: &'a Value },
    /// A two-argument combinator
    Binary {
        argument1: &'a Value,
        argument2: &'a Value,
    },
    /// Anything else, including non-objects and unknown kinds
    Opaque(&'a Value),
}

/// The declared kind of a node, without namespace
pub fn kind_of(value: &Value) -> Option<&str> {
    let kind = value.get(keys::TYPE)?.as_str()?;
    Some(kind.strip_prefix(NAMESPACE).unwrap_or(kind))
}

impl<'a> DensityNode<'a> {
    /// Classify a value. Known kinds missing their children are opaque.
    pub fn classify(value: &'a Value) -> Self {
        let Some(kind) = kind_of(value) else {
            return Self::Opaque(value);
        };

        if kind == keys::SPLINE {
            if let Some(spline) = value.get(keys::SPLINE) {
                return Self::Spline { spline };
            }
        } else if UNARY_KINDS.contains(&kind) {
            if let Some(argument) = value.get(keys::ARGUMENT) {
                return Self::Unary { argument };
            }
        } else if BINARY_KINDS.contains(&kind) {
            if let (Some(argument1), Some(argument2)) =
                (value.get(keys::ARGUMENT1), value.get(keys::ARGUMENT2))
            {
                return Self::Binary {
                    argument1,
                    argument2,
                };
            }
        }
        Self::Opaque(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn namespace_is_optional() {
        assert_eq!(kind_of(&json!({"type": "minecraft:add"})), Some("add"));
        assert_eq!(kind_of(&json!({"type": "add"})), Some("add"));
        assert_eq!(kind_of(&json!({"kind": "add"})), None);
        assert_eq!(kind_of(&json!(3.0)), None);
    }

    #[test]
    fn classify_known_kinds() {
        let spline = json!({"type": "minecraft:spline", "spline": {"points": []}});
        assert!(matches!(
            DensityNode::classify(&spline),
            DensityNode::Spline { .. }
        ));

        let unary = json!({"type": "minecraft:flat_cache", "argument": 1.0});
        assert!(matches!(
            DensityNode::classify(&unary),
            DensityNode::Unary { .. }
        ));

        let binary = json!({"type": "minecraft:mul", "argument1": 1.0, "argument2": 2.0});
        assert!(matches!(
            DensityNode::classify(&binary),
            DensityNode::Binary { .. }
        ));
    }

    #[test]
    fn unknown_or_incomplete_nodes_are_opaque() {
        let unknown = json!({"type": "minecraft:noise", "noise": "x"});
        assert!(matches!(
            DensityNode::classify(&unknown),
            DensityNode::Opaque(_)
        ));

        let missing = json!({"type": "minecraft:add", "argument1": 1.0});
        assert!(matches!(
            DensityNode::classify(&missing),
            DensityNode::Opaque(_)
        ));

        let reference = json!("minecraft:overworld/continents");
        assert!(matches!(
            DensityNode::classify(&reference),
            DensityNode::Opaque(_)
        ));
    }
}
