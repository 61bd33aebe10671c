// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Normalizes an edit outcome into the caller-facing image reference

use base64::Engine as _;

use super::client::EditOutcome;

/// Produce the single image reference returned to the caller: a hosted URL
/// passes through unchanged, an inline payload becomes a data URI.
pub fn normalize(outcome: EditOutcome) -> String {
    match outcome {
        EditOutcome::Url(url) => url,
        EditOutcome::Inline { data, mime } => format!(
            "data:{};base64,{}",
            mime,
            base64::engine::general_purpose::STANDARD.encode(data)
        ),
    }
}
