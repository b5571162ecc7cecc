// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for parsing, patching and configuring the editor.

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while binding points to a density function.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The source text is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Syntax(String),

    /// No spline node is reachable through the known node kinds.
    #[error("No editable spline found in the density function")]
    StructureNotFound,

    /// The edited point list cannot be aligned with the source points.
    #[error(
        "Cannot match edited points against the source \
         (source point {old_index}, edited point {new_index})"
    )]
    ReconciliationAmbiguous { old_index: usize, new_index: usize },

    /// A point list handed to the editor breaks ordering or count rules.
    #[error("Invalid point list: {0}")]
    InvariantViolation(String),

    /// The patched document could not be written back out.
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An editor configuration value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EditorError {
    /// Whether this error means the source must be fixed before editing
    /// can continue (as opposed to a single rejected edit).
    pub fn blocks_editing(&self) -> bool {
        matches!(self, Self::Syntax(_) | Self::StructureNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_errors_block_editing() {
        assert!(EditorError::Syntax("eof".into()).blocks_editing());
        assert!(EditorError::StructureNotFound.blocks_editing());
        assert!(
            !EditorError::ReconciliationAmbiguous {
                old_index: 1,
                new_index: 1
            }
            .blocks_editing()
        );
        assert!(!EditorError::InvariantViolation("x".into()).blocks_editing());
    }

    #[test]
    fn messages_are_human_readable() {
        let err = EditorError::ReconciliationAmbiguous {
            old_index: 2,
            new_index: 3,
        };
        assert_eq!(
            err.to_string(),
            "Cannot match edited points against the source (source point 2, edited point 3)"
        );
        assert_eq!(
            EditorError::StructureNotFound.to_string(),
            "No editable spline found in the density function"
        );
    }
}
