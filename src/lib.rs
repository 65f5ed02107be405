// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Thetis keeps a diagram model and its Mermaid `graph TD` text in sync.
//!
//! - [`model`]: nodes, edges and the id allocator
//! - [`format::mermaid`]: text parser and generator
//! - [`ops`]: total mutation operations with change deltas
//! - [`sync`]: the sync controller, its typing guard and the async session driver

pub mod config;
pub mod format;
pub mod layout;
pub mod model;
pub mod ops;
pub mod sync;

pub use config::SyncConfig;
pub use sync::{Snapshot, SyncController, SyncState, ViewIntent};
