// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Node/edge mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(graph: &mut GraphModel, op: &Op, delta: &mut DeltaBuilder) {
    match op {
        Op::AddNode {
            node_id,
            kind,
            position,
            size,
            label,
        } => {
            let node = Node::new(*kind, label.clone())
                .with_position(*position)
                .with_size(*size);
            if !graph.insert_node(node_id.clone(), node) {
                tracing::debug!(%node_id, "add node skipped: id already exists");
                return;
            }
            delta.record_added(ObjectRef::Node(node_id.clone()));
        }
        Op::UpdateNode { node_id, patch } => {
            let Some(existing) = graph.node_mut(node_id.as_str()) else {
                tracing::debug!(%node_id, "update node skipped: unknown id");
                return;
            };
            let before = existing.clone();
            if let Some(kind) = patch.kind {
                existing.set_kind(kind);
            }
            if let Some(position) = patch.position {
                existing.set_position(position);
            }
            if let Some(size) = patch.size {
                existing.set_size(size);
            }
            if let Some(label) = &patch.label {
                existing.set_label(label.clone());
            }
            if *existing != before {
                delta.record_updated(ObjectRef::Node(node_id.clone()));
            }
        }
        Op::RemoveNode { node_id } => {
            let Some((_, cascaded)) = graph.remove_node(node_id.as_str()) else {
                tracing::debug!(%node_id, "remove node skipped: unknown id");
                return;
            };
            for edge_id in cascaded {
                delta.record_removed(ObjectRef::Edge(edge_id));
            }
            delta.record_removed(ObjectRef::Node(node_id.clone()));
        }
        Op::AddEdge {
            edge_id,
            from,
            to,
            label,
        } => {
            if !graph.contains_node(from.as_str()) || !graph.contains_node(to.as_str()) {
                tracing::debug!(%edge_id, %from, %to, "add edge skipped: unknown endpoint");
                return;
            }
            let edge = Edge::new_with(from.clone(), to.clone(), label.clone());
            if !graph.insert_edge(edge_id.clone(), edge) {
                tracing::debug!(%edge_id, "add edge skipped: id already exists");
                return;
            }
            delta.record_added(ObjectRef::Edge(edge_id.clone()));
        }
        Op::UpdateEdge { edge_id, patch } => {
            let Some(existing) = graph.edge_mut(edge_id.as_str()) else {
                tracing::debug!(%edge_id, "update edge skipped: unknown id");
                return;
            };
            let before = existing.clone();
            if let Some(label) = &patch.label {
                existing.set_label(Some(label.clone()));
            }
            if *existing != before {
                delta.record_updated(ObjectRef::Edge(edge_id.clone()));
            }
        }
        Op::RemoveEdge { edge_id } => {
            if graph.remove_edge(edge_id.as_str()).is_none() {
                tracing::debug!(%edge_id, "remove edge skipped: unknown id");
                return;
            }
            delta.record_removed(ObjectRef::Edge(edge_id.clone()));
        }
    }
}
