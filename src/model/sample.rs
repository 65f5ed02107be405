// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::graph::{Edge, GraphModel, Node, NodeKind, Point};
use super::ids::{EdgeId, NodeId};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

/// The graph a fresh session starts with: `Start --> Process --> End`.
pub fn sample_graph() -> GraphModel {
    let mut graph = GraphModel::default();

    let n_a = nid("A");
    let n_b = nid("B");
    let n_c = nid("C");

    graph.insert_node(
        n_a.clone(),
        Node::new(NodeKind::Rectangle, "Start").with_position(Point::new(100.0, 100.0)),
    );
    graph.insert_node(
        n_b.clone(),
        Node::new(NodeKind::Rectangle, "Process").with_position(Point::new(300.0, 100.0)),
    );
    graph.insert_node(
        n_c.clone(),
        Node::new(NodeKind::Rectangle, "End").with_position(Point::new(500.0, 100.0)),
    );

    graph.insert_edge(eid("conn1"), Edge::new(n_a, n_b.clone()));
    graph.insert_edge(eid("conn2"), Edge::new(n_b, n_c));

    graph
}
