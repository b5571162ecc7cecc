// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Runtime editor configuration, optionally loaded from a TOML file.
//!
//! Every field falls back to the matching constant in `settings`, so a
//! config file only needs to mention what it changes:
//!
//! ```toml
//! debounce = false
//! history_limit = 50
//! ```

use crate::error::{EditorError, EditorResult};
use crate::settings;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// User-tunable editor behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Collapse bursts of edits into one delayed write
    pub debounce: bool,

    /// Delay before a pending edit is written (milliseconds)
    pub commit_delay_ms: u64,

    /// Maximum number of source snapshots kept for undo
    pub history_limit: usize,

    /// Extra pointer slop for hit testing (device pixels)
    pub hit_slop_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce: settings::commit::DEBOUNCE_ENABLED,
            commit_delay_ms: settings::commit::DELAY_MS,
            history_limit: settings::commit::HISTORY_LIMIT,
            hit_slop_px: settings::editing::HIT_SLOP_PX,
        }
    }
}

impl EditorConfig {
    /// Config that writes every edit straight through
    pub fn immediate() -> Self {
        Self {
            debounce: false,
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> EditorResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| EditorError::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Delay before a debounced commit fires
    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    fn validate(&self) -> EditorResult<()> {
        if self.history_limit == 0 {
            return Err(EditorError::Config(
                "history_limit must be at least 1".to_string(),
            ));
        }
        if !self.hit_slop_px.is_finite() || self.hit_slop_px < 0.0 {
            return Err(EditorError::Config(format!(
                "hit_slop_px must be a non-negative number, got {}",
                self.hit_slop_px
            )));
        }
        Ok(())
    }
}
