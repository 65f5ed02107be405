// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tunables of the sync engine.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "typing_debounce_ms": 750, "layout": { "max_x": 900 } }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::layout::LayoutConfig;

pub const DEFAULT_TYPING_DEBOUNCE_MS: u64 = 1_000;
pub const DEFAULT_NEW_NODE_LABEL: &str = "New Shape";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Quiet period after the last keystroke before the text editor counts as idle.
    pub typing_debounce_ms: u64,
    pub layout: LayoutConfig,
    pub new_node_label: String,
    /// Keep position and size of nodes that survive a re-parse.
    pub preserve_geometry: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            typing_debounce_ms: DEFAULT_TYPING_DEBOUNCE_MS,
            layout: LayoutConfig::default(),
            new_node_label: DEFAULT_NEW_NODE_LABEL.to_owned(),
            preserve_geometry: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl SyncConfig {
    pub fn typing_debounce(&self) -> Duration {
        Duration::from_millis(self.typing_debounce_ms)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: SyncConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let read_error = |source| ConfigError::Read {
            path: path.to_owned(),
            source,
        };
        let raw = std::fs::read_to_string(path).map_err(read_error)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing_debounce_ms == 0 {
            return invalid("typing_debounce_ms must be positive");
        }

        let layout = &self.layout;
        let finite = [
            layout.origin.x,
            layout.origin.y,
            layout.step_x,
            layout.step_y,
            layout.max_x,
        ];
        if finite.iter().any(|value| !value.is_finite()) {
            return invalid("layout values must be finite");
        }
        if layout.step_x <= 0.0 || layout.step_y <= 0.0 {
            return invalid("layout steps must be positive");
        }
        if layout.max_x < layout.origin.x {
            return Err(ConfigError::Invalid(format!(
                "layout.max_x ({}) must not be left of layout.origin.x ({})",
                layout.max_x, layout.origin.x
            )));
        }

        let size = layout.node_size;
        let finite = size.width.is_finite() && size.height.is_finite();
        if !(finite && size.width > 0.0 && size.height > 0.0) {
            return invalid("layout.node_size must be positive");
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(reason.to_owned()))
}
