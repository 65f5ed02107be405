// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keeps the graph model and the graph text consistent.
//!
//! The controller owns both representations. Direct manipulation mutates the model and, while the
//! user is not typing, regenerates the text from it. A text edit re-parses the model from the text
//! and arms the typing guard; until the guard elapses, model mutations leave the displayed text
//! exactly as typed so the editor never rewrites itself under the cursor.
//!
//! Time is passed in explicitly (`now`), so the controller itself never sleeps. [`session`] wraps
//! it in a tokio task that owns the actual timer.

use std::panic::{catch_unwind, AssertUnwindSafe};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::config::SyncConfig;
use crate::format::mermaid::{
    export_flowchart, parse_flowchart_with, ParseWarning, ParsedFlowchart,
};
use crate::layout::LayoutConfig;
use crate::model::{EdgeId, GraphModel, NodeId, NodeKind, Point, Size};
use crate::ops::{apply_ops, Delta, EdgePatch, NodePatch, Op};

pub mod script;
pub mod session;
pub mod view;

pub use view::{EdgeSnapshot, NodeSnapshot, Snapshot, ViewIntent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    #[default]
    Idle,
    /// A text edit happened within the debounce window; text regeneration is suppressed.
    Typing,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncWarning {
    #[error(transparent)]
    Parse(#[from] ParseWarning),
    #[error("parser failed ({message}); keeping the previous diagram")]
    ParserFailed { message: String },
}

/// Text-to-model parser used on every text edit.
pub type ParseFn = fn(&str, &LayoutConfig) -> ParsedFlowchart;

#[derive(Debug, Clone)]
pub struct SyncController {
    config: SyncConfig,
    graph: GraphModel,
    text: String,
    state: SyncState,
    typing_deadline: Option<Instant>,
    warnings: Vec<SyncWarning>,
    parser: ParseFn,
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}

impl SyncController {
    pub fn new(config: SyncConfig) -> Self {
        Self::with_graph(config, GraphModel::default())
    }

    /// Starts from an existing model; the text is generated from it.
    pub fn with_graph(config: SyncConfig, graph: GraphModel) -> Self {
        let text = export_flowchart(&graph);
        Self {
            config,
            graph,
            text,
            state: SyncState::Idle,
            typing_deadline: None,
            warnings: Vec::new(),
            parser: parse_flowchart_with,
        }
    }

    pub fn with_parser(mut self, parser: ParseFn) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    /// The text as the editor should display it.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Diagnostics of the most recent text edit.
    pub fn warnings(&self) -> &[SyncWarning] {
        &self.warnings
    }

    pub fn typing_deadline(&self) -> Option<Instant> {
        self.typing_deadline
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.graph, self.state, &self.text, &self.warnings)
    }

    /// Applies `ops` and regenerates the text if something changed and nobody is typing.
    pub fn apply(&mut self, ops: &[Op]) -> Delta {
        let delta = apply_ops(&mut self.graph, ops);
        if !delta.is_empty() && self.state == SyncState::Idle {
            self.regenerate_text();
        }
        delta
    }

    /// Places a new node of `kind` at `position` with the configured default label and size.
    pub fn add_node(&mut self, kind: NodeKind, position: Point) -> NodeId {
        let node_id = self.graph.allocate_node_id();
        self.apply(&[Op::AddNode {
            node_id: node_id.clone(),
            kind,
            position,
            size: self.config.layout.node_size,
            label: self.config.new_node_label.clone(),
        }]);
        node_id
    }

    pub fn move_node(&mut self, node_id: &str, position: Point) -> Delta {
        let patch = NodePatch {
            position: Some(position),
            ..NodePatch::default()
        };
        self.update_node(node_id, patch)
    }

    pub fn resize_node(&mut self, node_id: &str, size: Size) -> Delta {
        let patch = NodePatch {
            size: Some(size),
            ..NodePatch::default()
        };
        self.update_node(node_id, patch)
    }

    pub fn set_node_label(&mut self, node_id: &str, label: impl Into<String>) -> Delta {
        let patch = NodePatch {
            label: Some(label.into()),
            ..NodePatch::default()
        };
        self.update_node(node_id, patch)
    }

    pub fn set_node_kind(&mut self, node_id: &str, kind: NodeKind) -> Delta {
        let patch = NodePatch {
            kind: Some(kind),
            ..NodePatch::default()
        };
        self.update_node(node_id, patch)
    }

    /// Deletes the node and every edge attached to it.
    pub fn delete_node(&mut self, node_id: &str) -> Delta {
        match parse_id::<NodeId>(node_id) {
            Some(node_id) => self.apply(&[Op::RemoveNode { node_id }]),
            None => Delta::default(),
        }
    }

    /// Connects two existing, distinct nodes. Returns the new edge id.
    pub fn connect(&mut self, from: &str, to: &str) -> Option<EdgeId> {
        if from == to {
            tracing::debug!(node_id = from, "connect skipped: self connection");
            return None;
        }
        let (Some(from), Some(to)) = (parse_id::<NodeId>(from), parse_id::<NodeId>(to)) else {
            return None;
        };
        if !self.graph.contains_node(from.as_str()) || !self.graph.contains_node(to.as_str()) {
            tracing::debug!(%from, %to, "connect skipped: unknown endpoint");
            return None;
        }

        let edge_id = self.graph.allocate_edge_id();
        let delta = self.apply(&[Op::AddEdge {
            edge_id: edge_id.clone(),
            from,
            to,
            label: None,
        }]);
        (!delta.is_empty()).then_some(edge_id)
    }

    /// Sets the edge label; a blank label removes it.
    pub fn set_edge_label(&mut self, edge_id: &str, label: impl Into<String>) -> Delta {
        match parse_id::<EdgeId>(edge_id) {
            Some(edge_id) => self.apply(&[Op::UpdateEdge {
                edge_id,
                patch: EdgePatch {
                    label: Some(label.into()),
                },
            }]),
            None => Delta::default(),
        }
    }

    pub fn delete_edge(&mut self, edge_id: &str) -> Delta {
        match parse_id::<EdgeId>(edge_id) {
            Some(edge_id) => self.apply(&[Op::RemoveEdge { edge_id }]),
            None => Delta::default(),
        }
    }

    /// Takes the editor content verbatim and rebuilds the model from it.
    ///
    /// Arms (or re-arms) the typing guard and returns its new deadline. The text itself is never
    /// rewritten here. If the parser panics, the previous model stays in place and the failure is
    /// reported through [`SyncController::warnings`].
    pub fn apply_text(&mut self, text: impl Into<String>, now: Instant) -> Instant {
        self.text = text.into();
        let deadline = now + self.config.typing_debounce();
        self.typing_deadline = Some(deadline);
        self.state = SyncState::Typing;

        let parser = self.parser;
        let layout = &self.config.layout;
        let source = self.text.as_str();
        match catch_unwind(AssertUnwindSafe(|| parser(source, layout))) {
            Ok(parsed) => {
                for warning in &parsed.warnings {
                    tracing::warn!(line_no = warning.line_no, "{warning}");
                }
                self.warnings = parsed.warnings.into_iter().map(Into::into).collect();
                let preserve = self.config.preserve_geometry;
                self.graph.replace_with(parsed.graph, preserve);
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(%message, "parser failed; keeping the previous diagram");
                self.warnings = vec![SyncWarning::ParserFailed { message }];
            }
        }
        deadline
    }

    /// Timer callback of the typing guard.
    ///
    /// Returns `true` if the guard cleared. A fire for a deadline that has since been re-armed to
    /// a later instant is ignored. The text is left as typed either way.
    pub fn typing_elapsed(&mut self, now: Instant) -> bool {
        match self.typing_deadline {
            Some(deadline) if now >= deadline => {
                self.typing_deadline = None;
                self.state = SyncState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drops the typing guard and regenerates the text from the model right away.
    pub fn flush(&mut self) {
        self.typing_deadline = None;
        self.state = SyncState::Idle;
        self.regenerate_text();
    }

    /// Routes a view intent to the matching entry point.
    pub fn dispatch(&mut self, intent: ViewIntent, now: Instant) {
        match intent {
            ViewIntent::ShapeDropped { kind, x, y } => {
                self.add_node(kind, Point::new(x, y));
            }
            ViewIntent::ShapeMoved { node_id, x, y } => {
                self.move_node(&node_id, Point::new(x, y));
            }
            ViewIntent::ShapeResized {
                node_id,
                width,
                height,
            } => {
                self.resize_node(&node_id, Size::new(width, height));
            }
            ViewIntent::ShapeDeleted { node_id } => {
                self.delete_node(&node_id);
            }
            ViewIntent::ShapeLabelEdited { node_id, label } => {
                self.set_node_label(&node_id, label);
            }
            ViewIntent::ShapeKindChanged { node_id, kind } => {
                self.set_node_kind(&node_id, kind);
            }
            ViewIntent::ConnectionRequested { from, to } => {
                self.connect(&from, &to);
            }
            ViewIntent::ConnectionLabelEdited { edge_id, label } => {
                self.set_edge_label(&edge_id, label);
            }
            ViewIntent::ConnectionDeleted { edge_id } => {
                self.delete_edge(&edge_id);
            }
            ViewIntent::TextChanged { text } => {
                self.apply_text(text, now);
            }
            ViewIntent::Flush => self.flush(),
        }
    }

    fn update_node(&mut self, node_id: &str, patch: NodePatch) -> Delta {
        match parse_id::<NodeId>(node_id) {
            Some(node_id) => self.apply(&[Op::UpdateNode { node_id, patch }]),
            None => Delta::default(),
        }
    }

    fn regenerate_text(&mut self) {
        self.text = export_flowchart(&self.graph);
    }
}

fn parse_id<T: std::str::FromStr<Err = crate::model::IdError>>(raw: &str) -> Option<T> {
    match raw.parse() {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::debug!(id = raw, %err, "ignoring invalid id");
            None
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
