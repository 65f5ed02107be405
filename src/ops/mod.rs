// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for the graph model.
//!
//! Operations are total: an op naming an unknown id (or adding an id that already exists) is
//! skipped rather than rejected. Applying a batch yields a [`Delta`] of what actually changed; an
//! empty delta means nothing did.

use std::collections::BTreeSet;

use crate::model::{Edge, EdgeId, GraphModel, Node, NodeId, NodeKind, Point, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    AddNode {
        node_id: NodeId,
        kind: NodeKind,
        position: Point,
        size: Size,
        label: String,
    },
    UpdateNode {
        node_id: NodeId,
        patch: NodePatch,
    },
    RemoveNode {
        node_id: NodeId,
    },
    AddEdge {
        edge_id: EdgeId,
        from: NodeId,
        to: NodeId,
        label: Option<String>,
    },
    UpdateEdge {
        edge_id: EdgeId,
        patch: EdgePatch,
    },
    RemoveEdge {
        edge_id: EdgeId,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub kind: Option<NodeKind>,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgePatch {
    /// A blank label clears it.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRef {
    Node(NodeId),
    Edge(EdgeId),
}

/// Which objects changed as the result of applying ops.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ObjectRef>,
    pub removed: Vec<ObjectRef>,
    pub updated: Vec<ObjectRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<ObjectRef>,
    removed: BTreeSet<ObjectRef>,
    updated: BTreeSet<ObjectRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, object_ref: ObjectRef) {
        self.removed.remove(&object_ref);
        self.updated.remove(&object_ref);
        self.added.insert(object_ref);
    }

    fn record_removed(&mut self, object_ref: ObjectRef) {
        // Added and removed within one batch: never observable, so drop it entirely.
        if self.added.remove(&object_ref) {
            self.updated.remove(&object_ref);
            return;
        }
        self.updated.remove(&object_ref);
        self.removed.insert(object_ref);
    }

    fn record_updated(&mut self, object_ref: ObjectRef) {
        if self.added.contains(&object_ref) || self.removed.contains(&object_ref) {
            return;
        }
        self.updated.insert(object_ref);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

/// Applies `ops` in order and bumps the graph revision once if anything changed.
pub fn apply_ops(graph: &mut GraphModel, ops: &[Op]) -> Delta {
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_op(graph, op, &mut delta);
    }

    let delta = delta.finish();
    if !delta.is_empty() {
        graph.bump_rev();
    }
    delta
}

// Extracted op-application implementation for node/edge mutations.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
