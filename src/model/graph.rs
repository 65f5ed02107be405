// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, IdAllocator, NodeId};

/// The drawable shape of a node. Each kind has its own bracket notation in graph text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Rectangle,
    Circle,
    Diamond,
    Oval,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [Self::Rectangle, Self::Circle, Self::Diamond, Self::Oval];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Oval => "oval",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const DEFAULT: Size = Size::new(120.0, 60.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    position: Point,
    size: Size,
    label: String,
}

impl Node {
    pub fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            position: Point::default(),
            size: Size::DEFAULT,
            label: label.into(),
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    label: Option<String>,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            label: None,
        }
    }

    pub fn new_with(from: NodeId, to: NodeId, label: Option<String>) -> Self {
        Self {
            from,
            to,
            label: normalize_edge_label(label),
        }
    }

    /// Blank labels are stored as `None`; the arrow renders unlabeled either way.
    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = normalize_edge_label(label.map(Into::into));
    }

    pub fn from(&self) -> &NodeId {
        &self.from
    }

    pub fn to(&self) -> &NodeId {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn touches(&self, node_id: &str) -> bool {
        self.from.as_str() == node_id || self.to.as_str() == node_id
    }
}

fn normalize_edge_label(label: Option<String>) -> Option<String> {
    label.filter(|label| !label.trim().is_empty())
}

/// Nodes and edges of one diagram, kept in insertion order.
///
/// All mutation primitives are total: unknown ids make them return `false`/`None` and leave the
/// model untouched. Removing a node removes every edge attached to it in the same call, so a
/// dangling edge can only exist if it was inserted dangling (as parsed text may do).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphModel {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    ids: IdAllocator,
    rev: u64,
}

impl GraphModel {
    pub fn nodes(&self) -> &IndexMap<NodeId, Node> {
        &self.nodes
    }

    pub fn edges(&self) -> &IndexMap<EdgeId, Edge> {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.get(edge_id)
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    pub fn edge_mut(&mut self, edge_id: &str) -> Option<&mut Edge> {
        self.edges.get_mut(edge_id)
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn contains_edge(&self, edge_id: &str) -> bool {
        self.edges.contains_key(edge_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    pub fn allocate_node_id(&mut self) -> NodeId {
        let taken = |candidate: &str| self.nodes.contains_key(candidate);
        self.ids.next_node_id(taken)
    }

    pub fn allocate_edge_id(&mut self) -> EdgeId {
        let taken = |candidate: &str| self.edges.contains_key(candidate);
        self.ids.next_edge_id(taken)
    }

    /// Inserts `node` under `node_id`; an existing id is left untouched and `false` is returned.
    pub fn insert_node(&mut self, node_id: NodeId, node: Node) -> bool {
        if self.nodes.contains_key(&node_id) {
            return false;
        }
        self.nodes.insert(node_id, node);
        true
    }

    /// Removes a node together with every edge that references it.
    ///
    /// Returns the removed node and the ids of the cascaded edges, in their former order.
    pub fn remove_node(&mut self, node_id: &str) -> Option<(Node, Vec<EdgeId>)> {
        let node = self.nodes.shift_remove(node_id)?;
        let cascaded = self
            .edges
            .iter()
            .filter(|(_, edge)| edge.touches(node_id))
            .map(|(edge_id, _)| edge_id.clone())
            .collect::<Vec<_>>();
        self.edges.retain(|_, edge| !edge.touches(node_id));
        Some((node, cascaded))
    }

    /// Inserts `edge` under `edge_id` without checking its endpoints.
    pub fn insert_edge(&mut self, edge_id: EdgeId, edge: Edge) -> bool {
        if self.edges.contains_key(&edge_id) {
            return false;
        }
        self.edges.insert(edge_id, edge);
        true
    }

    /// Appends `edge` under a freshly allocated id.
    pub fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let edge_id = self.allocate_edge_id();
        self.edges.insert(edge_id.clone(), edge);
        edge_id
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Option<Edge> {
        self.edges.shift_remove(edge_id)
    }

    pub fn is_renderable(&self, edge: &Edge) -> bool {
        self.nodes.contains_key(&edge.from) && self.nodes.contains_key(&edge.to)
    }

    /// Edges whose endpoints both resolve. Views draw only these.
    pub fn renderable_edges(&self) -> impl Iterator<Item = (&EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .filter(|(_, edge)| self.is_renderable(edge))
    }

    pub fn dangling_edges(&self) -> impl Iterator<Item = (&EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .filter(|(_, edge)| !self.is_renderable(edge))
    }

    /// Installs the content of `parsed` as this model's content.
    ///
    /// Parsed edges are re-keyed from this model's allocator, so edge ids never repeat across
    /// successive replacements. With `preserve_geometry`, nodes whose id survives keep their
    /// current position and size instead of the parsed fallback placement.
    pub fn replace_with(&mut self, parsed: GraphModel, preserve_geometry: bool) {
        let GraphModel {
            nodes: parsed_nodes,
            edges: parsed_edges,
            ..
        } = parsed;

        let mut nodes = IndexMap::with_capacity(parsed_nodes.len());
        for (node_id, mut node) in parsed_nodes {
            if preserve_geometry {
                if let Some(previous) = self.nodes.get(&node_id) {
                    node.set_position(previous.position());
                    node.set_size(previous.size());
                }
            }
            nodes.insert(node_id, node);
        }

        self.nodes = nodes;
        self.edges.clear();
        for edge in parsed_edges.into_values() {
            self.push_edge(edge);
        }
        self.bump_rev();
    }
}
