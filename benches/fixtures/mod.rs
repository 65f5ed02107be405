// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic benchmark graphs (no RNG).

use thetis::model::{Edge, GraphModel, Node, NodeId, NodeKind, Point};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    MediumDense,
    LargeLongLabels,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::MediumDense, Case::LargeLongLabels];

    /// Stable case id; results are compared across runs by this name.
    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::MediumDense => "medium_dense",
            Case::LargeLongLabels => "large_long_labels",
        }
    }

    fn shape(self) -> (usize, usize, usize) {
        // (nodes, out-degree, label length)
        match self {
            Case::Small => (10, 1, 8),
            Case::MediumDense => (120, 4, 16),
            Case::LargeLongLabels => (600, 2, 96),
        }
    }
}

fn label_of_len(prefix: &str, target_len: usize) -> String {
    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push('x');
    }
    out.truncate(target_len.max(1));
    out
}

pub fn graph(case: Case) -> GraphModel {
    let (nodes, out_degree, label_len) = case.shape();
    let mut graph = GraphModel::default();

    let ids = (0..nodes)
        .map(|i| NodeId::new(format!("n{i}")).expect("valid node id"))
        .collect::<Vec<_>>();
    for (i, node_id) in ids.iter().enumerate() {
        let kind = NodeKind::ALL[i % NodeKind::ALL.len()];
        let node = Node::new(kind, label_of_len(&format!("Step {i} "), label_len))
            .with_position(Point::new((i % 8) as f64 * 200.0, (i / 8) as f64 * 120.0));
        graph.insert_node(node_id.clone(), node);
    }

    for i in 0..nodes {
        for hop in 1..=out_degree {
            let j = (i + hop * 7) % nodes;
            if i == j {
                continue;
            }
            let label = (hop % 2 == 0).then(|| format!("via {hop}"));
            graph.push_edge(Edge::new_with(ids[i].clone(), ids[j].clone(), label));
        }
    }

    graph
}

pub fn checksum(graph: &GraphModel) -> u64 {
    let mut acc = 0u64;
    for (node_id, node) in graph.nodes() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(node_id.as_str().len() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(node.label().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(node.kind() as u64);
    }
    for edge in graph.edges().values() {
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(edge.from().as_str().len() as u64);
        acc = acc
            .wrapping_mul(131)
            .wrapping_add(edge.to().as_str().len() as u64);
        if let Some(label) = edge.label() {
            acc = acc.wrapping_mul(131).wrapping_add(label.len() as u64);
        }
    }
    acc
}
