// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{sample_graph, Edge, EdgeId, GraphModel, NodeId, NodeKind, Point, Size};

use super::{apply_ops, Delta, EdgePatch, NodePatch, ObjectRef, Op};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

fn remove_node(id: &str) -> Op {
    Op::RemoveNode { node_id: nid(id) }
}

fn label_edge(id: &str, label: &str) -> Op {
    Op::UpdateEdge {
        edge_id: eid(id),
        patch: EdgePatch {
            label: Some(label.to_owned()),
        },
    }
}

fn add_edge(id: &str, from: &str, to: &str) -> Op {
    Op::AddEdge {
        edge_id: eid(id),
        from: nid(from),
        to: nid(to),
        label: None,
    }
}

fn add_node(id: &str, label: &str) -> Op {
    Op::AddNode {
        node_id: nid(id),
        kind: NodeKind::Rectangle,
        position: Point::new(10.0, 20.0),
        size: Size::DEFAULT,
        label: label.to_owned(),
    }
}

#[test]
fn add_node_bumps_rev_and_reports_added() {
    let mut graph = GraphModel::default();

    let delta = apply_ops(&mut graph, &[add_node("n1", "Hello")]);

    assert_eq!(graph.rev(), 1);
    assert_eq!(delta.added, vec![ObjectRef::Node(nid("n1"))]);
    assert!(delta.removed.is_empty());
    assert!(delta.updated.is_empty());

    let node = graph.node("n1").expect("node n1");
    assert_eq!(node.label(), "Hello");
    assert_eq!(node.position(), Point::new(10.0, 20.0));
}

#[test]
fn add_node_with_existing_id_is_a_noop() {
    let mut graph = sample_graph();

    let delta = apply_ops(&mut graph, &[add_node("A", "Imposter")]);

    assert!(delta.is_empty());
    assert_eq!(graph.rev(), 0);
    assert_eq!(graph.node("A").expect("A").label(), "Start");
}

#[test]
fn update_node_applies_only_patched_fields() {
    let mut graph = sample_graph();

    let delta = apply_ops(
        &mut graph,
        &[Op::UpdateNode {
            node_id: nid("B"),
            patch: NodePatch {
                position: Some(Point::new(320.0, 180.0)),
                kind: Some(NodeKind::Diamond),
                ..NodePatch::default()
            },
        }],
    );

    assert_eq!(delta.updated, vec![ObjectRef::Node(nid("B"))]);
    let node = graph.node("B").expect("B");
    assert_eq!(node.position(), Point::new(320.0, 180.0));
    assert_eq!(node.kind(), NodeKind::Diamond);
    assert_eq!(node.label(), "Process");
    assert_eq!(node.size(), Size::DEFAULT);
}

#[test]
fn update_that_changes_nothing_yields_empty_delta() {
    let mut graph = sample_graph();

    let delta = apply_ops(
        &mut graph,
        &[Op::UpdateNode {
            node_id: nid("A"),
            patch: NodePatch {
                label: Some("Start".to_owned()),
                ..NodePatch::default()
            },
        }],
    );

    assert!(delta.is_empty());
    assert_eq!(graph.rev(), 0);
}

#[test]
fn remove_node_cascades_and_reports_removed_edges() {
    let mut graph = sample_graph();

    let delta = apply_ops(&mut graph, &[remove_node("A")]);

    let expected = vec![ObjectRef::Node(nid("A")), ObjectRef::Edge(eid("conn1"))];
    assert_eq!(delta.removed, expected);
    assert!(!graph.contains_node("A"));
    let touches_a = |edge: &Edge| edge.from().as_str() == "A" || edge.to().as_str() == "A";
    assert!(!graph.edges().values().any(touches_a));
    assert_eq!(graph.edges().len(), 1);
}

#[test]
fn unknown_ids_are_skipped_without_error() {
    let mut graph = sample_graph();
    let before = graph.clone();

    let delta = apply_ops(
        &mut graph,
        &[
            remove_node("ghost"),
            Op::RemoveEdge {
                edge_id: eid("ghost"),
            },
            Op::UpdateNode {
                node_id: nid("ghost"),
                patch: NodePatch::default(),
            },
            label_edge("ghost", "x"),
            remove_node("A"),
            remove_node("A"),
        ],
    );

    assert_eq!(delta.removed.len(), 2);
    assert!(!graph.contains_node("A"));
    assert_eq!(graph.rev(), before.rev() + 1);
}

#[test]
fn add_edge_requires_both_endpoints() {
    let mut graph = sample_graph();

    let delta = apply_ops(&mut graph, &[add_edge("e9", "A", "ghost")]);

    assert_eq!(delta, Delta::default());
    assert!(!graph.contains_edge("e9"));
}

#[test]
fn add_then_label_edge_within_one_batch_reports_only_added() {
    let mut graph = sample_graph();

    let ops = [add_edge("e9", "C", "A"), label_edge("e9", "loop")];
    let delta = apply_ops(&mut graph, &ops);

    assert_eq!(delta.added, vec![ObjectRef::Edge(eid("e9"))]);
    assert!(delta.updated.is_empty());
    assert_eq!(graph.edge("e9").and_then(|edge| edge.label()), Some("loop"));
}

#[test]
fn blank_edge_label_patch_clears_label() {
    let mut graph = sample_graph();
    let label = |graph: &GraphModel| graph.edge("conn1").and_then(Edge::label).map(str::to_owned);

    apply_ops(&mut graph, &[label_edge("conn1", "go")]);
    assert_eq!(label(&graph).as_deref(), Some("go"));

    let delta = apply_ops(&mut graph, &[label_edge("conn1", " ")]);
    assert_eq!(delta.updated, vec![ObjectRef::Edge(eid("conn1"))]);
    assert_eq!(label(&graph), None);
}

#[test]
fn add_then_remove_within_one_batch_is_invisible() {
    let mut graph = GraphModel::default();

    let delta = apply_ops(&mut graph, &[add_node("tmp", "x"), remove_node("tmp")]);

    assert!(delta.is_empty());
    assert!(graph.nodes().is_empty());
}
