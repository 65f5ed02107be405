// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A typed identifier for graph objects.
///
/// Ids are non-empty runs of ASCII letters, digits and `_`. They appear verbatim as tokens in the
/// generated graph text (`A --> B`), so any valid id is also a valid Mermaid identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id must not contain whitespace")]
    ContainsWhitespace,
    #[error("id contains invalid character: '{ch}'")]
    InvalidChar { ch: char },
}

fn is_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn validate_id(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsWhitespace);
    }
    if let Some(ch) = value.chars().find(|ch| !is_id_char(*ch)) {
        return Err(IdError::InvalidChar { ch });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeIdTag {}
pub type EdgeId = Id<EdgeIdTag>;

const NODE_ID_PREFIX: &str = "shape_";
const EDGE_ID_PREFIX: &str = "conn_";

/// Monotonic id source scoped to one graph model.
///
/// Counters only ever move forward, so an id handed out once is never handed out again by the
/// same allocator, even after the object it named was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next_node: u64,
    next_edge: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_node: 1,
            next_edge: 1,
        }
    }
}

impl IdAllocator {
    /// Next `shape_<n>` id for which `taken` returns false.
    pub fn next_node_id(&mut self, taken: impl Fn(&str) -> bool) -> NodeId {
        loop {
            let candidate = format!("{NODE_ID_PREFIX}{}", self.next_node);
            self.next_node = self.next_node.saturating_add(1);
            if !taken(&candidate) {
                return NodeId::new(candidate).expect("generated node id is valid");
            }
        }
    }

    /// Next `conn_<n>` id for which `taken` returns false.
    pub fn next_edge_id(&mut self, taken: impl Fn(&str) -> bool) -> EdgeId {
        loop {
            let candidate = format!("{EDGE_ID_PREFIX}{}", self.next_edge);
            self.next_edge = self.next_edge.saturating_add(1);
            if !taken(&candidate) {
                return EdgeId::new(candidate).expect("generated edge id is valid");
            }
        }
    }
}
