// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MermaidIdentError {
    #[error("must not be empty")]
    Empty,
    #[error("must not contain whitespace")]
    ContainsWhitespace,
    #[error("contains invalid character: '{ch}'")]
    InvalidChar { ch: char },
}

pub(super) fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub(super) fn validate_mermaid_ident(ident: &str) -> Result<(), MermaidIdentError> {
    if ident.is_empty() {
        return Err(MermaidIdentError::Empty);
    }
    if ident.chars().any(char::is_whitespace) {
        return Err(MermaidIdentError::ContainsWhitespace);
    }
    if let Some(ch) = ident.chars().find(|ch| !is_ident_char(*ch)) {
        return Err(MermaidIdentError::InvalidChar { ch });
    }
    Ok(())
}

/// Splits `input` into its leading identifier run and the remainder.
pub(super) fn split_leading_ident(input: &str) -> (&str, &str) {
    let end = input
        .find(|ch: char| !is_ident_char(ch))
        .unwrap_or(input.len());
    input.split_at(end)
}
