// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Timed intent scripts for headless sessions.
//!
//! A script is JSON lines, one [`ScriptStep`] per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! {"at_ms": 0,   "intent": {"type": "text_changed", "text": "graph TD\nA[Start]"}}
//! {"at_ms": 200, "intent": {"type": "shape_moved", "node_id": "A", "x": 40, "y": 80}}
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::session::{self, SessionError};
use super::{SyncController, ViewIntent};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    /// Offset from the start of the replay, in milliseconds. Must not decrease.
    pub at_ms: u64,
    pub intent: ViewIntent,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("script line {line_no}: {source}")]
    Parse {
        line_no: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("script line {line_no}: at_ms {at_ms} is before {previous_ms}")]
    OutOfOrder {
        line_no: usize,
        at_ms: u64,
        previous_ms: u64,
    },
}

pub fn parse_script(input: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps: Vec<ScriptStep> = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let step: ScriptStep =
            serde_json::from_str(line).map_err(|source| ScriptError::Parse { line_no, source })?;
        if let Some(previous) = steps.last() {
            if step.at_ms < previous.at_ms {
                return Err(ScriptError::OutOfOrder {
                    line_no,
                    at_ms: step.at_ms,
                    previous_ms: previous.at_ms,
                });
            }
        }
        steps.push(step);
    }
    Ok(steps)
}

pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<ScriptStep>, ScriptError> {
    let path = path.as_ref();
    let read_error = |source| ScriptError::Read {
        path: path.to_owned(),
        source,
    };
    let raw = std::fs::read_to_string(path).map_err(read_error)?;
    parse_script(&raw)
}

/// JSON schema of one script line.
pub fn script_step_schema() -> schemars::Schema {
    schemars::schema_for!(ScriptStep)
}

/// Feeds `steps` into a fresh session at their offsets, waits `settle` after the last one and
/// returns the controller in its final state.
pub async fn replay(
    controller: SyncController,
    steps: &[ScriptStep],
    settle: Duration,
) -> Result<SyncController, SessionError> {
    let session = session::spawn(controller);
    let start = Instant::now();
    for step in steps {
        tokio::time::sleep_until(start + Duration::from_millis(step.at_ms)).await;
        tracing::debug!(at_ms = step.at_ms, "replaying intent");
        session.send(step.intent.clone()).await?;
    }
    tokio::time::sleep(settle).await;
    session.close().await
}
