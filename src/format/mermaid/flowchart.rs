// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Cow;

use super::ident::{split_leading_ident, validate_mermaid_ident};
pub use super::ident::MermaidIdentError;

use crate::layout::{fallback_position, LayoutConfig};
use crate::model::{Edge, GraphModel, Id, Node, NodeId, NodeKind};

pub const HEADER: &str = "graph TD";
pub const EMPTY_PLACEHOLDER: &str = "%% Add shapes to start building the diagram";
pub const PLACEHOLDER_LABEL: &str = "Shape";

const INDENT: &str = "    ";
const ARROW: &str = "-->";
const COMMENT: &str = "%%";

/// Bracket forms in match precedence: `((` must be tried before `(`.
const NODE_FORMS: [(&str, &str, NodeKind); 4] = [
    ("((", "))", NodeKind::Circle),
    ("{", "}", NodeKind::Diamond),
    ("(", ")", NodeKind::Oval),
    ("[", "]", NodeKind::Rectangle),
];

fn delimiters(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Rectangle => ("[", "]"),
        NodeKind::Circle => ("((", "))"),
        NodeKind::Diamond => ("{", "}"),
        NodeKind::Oval => ("(", ")"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWarningKind {
    #[error("unrecognized syntax")]
    Unrecognized,
    #[error("invalid edge source '{name}' ({reason})")]
    InvalidEdgeSource {
        name: String,
        reason: MermaidIdentError,
    },
    #[error("edge has no target node")]
    MissingEdgeTarget,
    #[error("edge label is not closed with '|'")]
    UnterminatedEdgeLabel,
    #[error("ignored text after edge target: {rest}")]
    TrailingInput {
        rest: String,
    },
    #[error("node '{node_id}' is already declared; later declaration ignored")]
    DuplicateNode {
        node_id: String,
    },
}

/// A non-fatal diagnostic about one input line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line_no}: {kind}: {line}")]
pub struct ParseWarning {
    pub line_no: usize,
    pub line: String,
    pub kind: ParseWarningKind,
}

/// Result of a best-effort parse: whatever was recognized plus what was skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedFlowchart {
    pub graph: GraphModel,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeDecl<'a> {
    id: &'a str,
    kind: NodeKind,
    label: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EdgeDecl<'a> {
    from: &'a str,
    to: &'a str,
    label: Option<&'a str>,
    trailing: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Skip,
    Node(NodeDecl<'a>),
    Edge(EdgeDecl<'a>),
    Malformed(ParseWarningKind),
}

fn is_header_line(trimmed: &str) -> bool {
    let first_word = trimmed.split_whitespace().next();
    matches!(first_word, Some("graph" | "flowchart"))
}

fn classify_line(trimmed: &str) -> Line<'_> {
    if trimmed.is_empty() || trimmed.starts_with(COMMENT) || is_header_line(trimmed) {
        return Line::Skip;
    }
    if let Some(decl) = parse_node_decl(trimmed) {
        return Line::Node(decl);
    }
    if trimmed.contains(ARROW) {
        return parse_edge_decl(trimmed);
    }
    Line::Malformed(ParseWarningKind::Unrecognized)
}

fn parse_node_decl(trimmed: &str) -> Option<NodeDecl<'_>> {
    let (id, rest) = split_leading_ident(trimmed);
    if id.is_empty() {
        return None;
    }

    // The label runs up to the final closer, kept verbatim with delimiters and padding.
    NODE_FORMS.iter().find_map(|&(open, close, kind)| {
        let inner = rest.strip_prefix(open)?.strip_suffix(close)?;
        let label = if inner.trim().is_empty() { id } else { inner };
        Some(NodeDecl { id, kind, label })
    })
}

fn parse_edge_decl(trimmed: &str) -> Line<'_> {
    let Some(arrow_idx) = trimmed.find(ARROW) else {
        return Line::Malformed(ParseWarningKind::Unrecognized);
    };

    let from = trimmed[..arrow_idx].trim();
    if let Err(reason) = validate_mermaid_ident(from) {
        return Line::Malformed(ParseWarningKind::InvalidEdgeSource {
            name: from.to_owned(),
            reason,
        });
    }

    let mut rest = trimmed[arrow_idx + ARROW.len()..].trim_start();
    let mut label = None;
    if let Some(after_bar) = rest.strip_prefix('|') {
        let Some(end_idx) = after_bar.find('|') else {
            return Line::Malformed(ParseWarningKind::UnterminatedEdgeLabel);
        };
        let text = after_bar[..end_idx].trim();
        label = (!text.is_empty()).then_some(text);
        rest = after_bar[end_idx + 1..].trim_start();
    }

    let (to, trailing) = split_leading_ident(rest);
    if to.is_empty() {
        return Line::Malformed(ParseWarningKind::MissingEdgeTarget);
    }

    Line::Edge(EdgeDecl {
        from,
        to,
        label,
        trailing: trailing.trim(),
    })
}

fn ident_id<T>(ident: &str) -> Id<T> {
    Id::new(ident).expect("mermaid identifiers are valid ids")
}

/// Parse graph text with the default fallback layout.
pub fn parse_flowchart(input: &str) -> ParsedFlowchart {
    parse_flowchart_with(input, &LayoutConfig::default())
}

/// Parse the node/edge subset of Mermaid `graph` text.
///
/// Recognized lines:
/// - `graph <dir>` / `flowchart <dir>` headers and `%%` comments (skipped)
/// - node declarations `<id>[<label>]`, `<id>((<label>))`, `<id>{<label>}`, `<id>(<label>)`
/// - edges `<from> --> <to>` and `<from> -->|<label>| <to>`
///
/// Parsing never fails. Unrecognized lines are skipped and reported in
/// [`ParsedFlowchart::warnings`]. The first declaration of a node id wins. Edges are not checked
/// against declared nodes, so the result may contain dangling edges.
pub fn parse_flowchart_with(input: &str, layout: &LayoutConfig) -> ParsedFlowchart {
    let mut graph = GraphModel::default();
    let mut warnings = Vec::new();
    let mut placed = 0usize;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();
        let mut warn = |kind: ParseWarningKind| {
            warnings.push(ParseWarning {
                line_no,
                line: trimmed.to_owned(),
                kind,
            });
        };

        match classify_line(trimmed) {
            Line::Skip => {}
            Line::Node(decl) => {
                if graph.contains_node(decl.id) {
                    warn(ParseWarningKind::DuplicateNode {
                        node_id: decl.id.to_owned(),
                    });
                    continue;
                }
                let node = Node::new(decl.kind, decl.label)
                    .with_position(fallback_position(placed, layout))
                    .with_size(layout.node_size);
                placed += 1;
                let node_id: NodeId = ident_id(decl.id);
                graph.insert_node(node_id, node);
            }
            Line::Edge(decl) => {
                let from: NodeId = ident_id(decl.from);
                let to: NodeId = ident_id(decl.to);
                graph.push_edge(Edge::new_with(from, to, decl.label.map(str::to_owned)));
                if !decl.trailing.is_empty() {
                    warn(ParseWarningKind::TrailingInput {
                        rest: decl.trailing.to_owned(),
                    });
                }
            }
            Line::Malformed(kind) => warn(kind),
        }
    }

    ParsedFlowchart { graph, warnings }
}

/// Line breaks would split a declaration across lines; fold them into spaces.
fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r']) {
        Cow::Owned(text.replace("\r\n", " ").replace(['\n', '\r'], " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Export a graph to canonical `graph TD` text.
///
/// Export is deterministic: nodes and then edges are emitted in insertion order, one per line.
/// A graph without nodes exports as the header plus a comment placeholder. Blank node labels are
/// written as `Shape`; blank edge labels produce an unlabeled arrow.
pub fn export_flowchart(graph: &GraphModel) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    if graph.nodes().is_empty() {
        out.push_str(INDENT);
        out.push_str(EMPTY_PLACEHOLDER);
        out.push('\n');
        return out;
    }

    for (node_id, node) in graph.nodes() {
        let label = if node.label().trim().is_empty() {
            PLACEHOLDER_LABEL
        } else {
            node.label()
        };
        let (open, close) = delimiters(node.kind());
        out.push_str(INDENT);
        out.push_str(node_id.as_str());
        out.push_str(open);
        out.push_str(&single_line(label));
        out.push_str(close);
        out.push('\n');
    }

    for edge in graph.edges().values() {
        out.push_str(INDENT);
        out.push_str(edge.from().as_str());
        out.push(' ');
        out.push_str(ARROW);
        let label = edge.label().map(str::trim).unwrap_or_default();
        if !label.is_empty() {
            out.push('|');
            out.push_str(&single_line(label));
            out.push('|');
        }
        out.push(' ');
        out.push_str(edge.to().as_str());
        out.push('\n');
    }

    out
}
