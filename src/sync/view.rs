// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire types shared with the view layer.
//!
//! Ids travel as plain strings; the controller validates them on dispatch and ignores the ones it
//! cannot resolve.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{GraphModel, NodeKind, Point, Size};

use super::{SyncState, SyncWarning};

/// One user gesture, as reported by the canvas or the text editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewIntent {
    /// A shape was dragged from the palette and dropped at `(x, y)`.
    ShapeDropped {
        kind: NodeKind,
        x: f64,
        y: f64,
    },
    ShapeMoved {
        node_id: String,
        x: f64,
        y: f64,
    },
    ShapeResized {
        node_id: String,
        width: f64,
        height: f64,
    },
    ShapeDeleted {
        node_id: String,
    },
    ShapeLabelEdited {
        node_id: String,
        label: String,
    },
    ShapeKindChanged {
        node_id: String,
        kind: NodeKind,
    },
    ConnectionRequested {
        from: String,
        to: String,
    },
    /// An empty label removes it.
    ConnectionLabelEdited {
        edge_id: String,
        label: String,
    },
    ConnectionDeleted {
        edge_id: String,
    },
    /// The full content of the text editor after a keystroke.
    TextChanged {
        text: String,
    },
    Flush,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeSnapshot {
    pub node_id: String,
    pub kind: NodeKind,
    pub label: String,
    pub position: Point,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EdgeSnapshot {
    pub edge_id: String,
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Everything a view needs to redraw, detached from the controller.
///
/// Only renderable edges are included: an edge whose endpoint is missing stays in the model but
/// is never drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    pub rev: u64,
    pub state: SyncState,
    pub text: String,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Snapshot {
    pub(crate) fn capture(
        graph: &GraphModel,
        state: SyncState,
        text: &str,
        warnings: &[SyncWarning],
    ) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|(node_id, node)| NodeSnapshot {
                node_id: node_id.to_string(),
                kind: node.kind(),
                label: node.label().to_owned(),
                position: node.position(),
                size: node.size(),
            })
            .collect();
        let edges = graph
            .renderable_edges()
            .map(|(edge_id, edge)| EdgeSnapshot {
                edge_id: edge_id.to_string(),
                from: edge.from().to_string(),
                to: edge.to().to_string(),
                label: edge.label().map(str::to_owned),
            })
            .collect();

        Self {
            rev: graph.rev(),
            state,
            text: text.to_owned(),
            nodes,
            edges,
            warnings: warnings.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|node| node.node_id == node_id)
    }
}
