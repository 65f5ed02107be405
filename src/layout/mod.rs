// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fallback placement for nodes that arrive from text and carry no geometry.
//!
//! Nodes are laid out on a fixed grid, left to right, wrapping to a new row once the next column
//! would pass `max_x`. The placement depends only on the node's ordinal, so parsing the same text
//! twice yields the same positions.

use serde::Deserialize;

use crate::model::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub origin: Point,
    pub step_x: f64,
    pub step_y: f64,
    pub max_x: f64,
    /// Size given to nodes created without explicit geometry.
    pub node_size: Size,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(100.0, 100.0),
            step_x: 200.0,
            step_y: 120.0,
            max_x: 700.0,
            node_size: Size::DEFAULT,
        }
    }
}

impl LayoutConfig {
    /// Number of grid columns that fit between `origin.x` and `max_x`; at least one.
    pub fn columns(&self) -> usize {
        if !(self.step_x > 0.0) || self.max_x < self.origin.x {
            return 1;
        }
        let span = ((self.max_x - self.origin.x) / self.step_x).floor();
        (span as usize).saturating_add(1)
    }
}

/// Grid position of the `ordinal`-th placed node (0-based).
pub fn fallback_position(ordinal: usize, layout: &LayoutConfig) -> Point {
    let columns = layout.columns();
    let col = ordinal % columns;
    let row = ordinal / columns;
    Point::new(
        layout.origin.x + col as f64 * layout.step_x,
        layout.origin.y + row as f64 * layout.step_y,
    )
}
