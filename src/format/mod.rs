// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram text format parsing/export.

pub mod mermaid;
