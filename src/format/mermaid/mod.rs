// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid `graph TD` parsing and exporting for the node/edge subset the editor produces.

pub mod flowchart;
mod ident;

pub use flowchart::{
    export_flowchart, parse_flowchart, parse_flowchart_with, MermaidIdentError, ParseWarning,
    ParseWarningKind, ParsedFlowchart,
};
