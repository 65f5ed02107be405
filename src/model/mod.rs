// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A [`GraphModel`] holds nodes and edges in insertion order and is the single source of truth
//! the sync controller mutates.

pub mod graph;
pub mod ids;
pub mod sample;

pub use graph::{Edge, GraphModel, Node, NodeKind, Point, Size};
pub use ids::{EdgeId, Id, IdAllocator, IdError, NodeId};
pub use sample::sample_graph;
