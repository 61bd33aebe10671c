// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image processing response types

use serde::{Deserialize, Serialize};

/// Success response for POST /v1/images/process
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessImageResponse {
    /// Either an absolute URL or a `data:` URI
    pub image: String,

    /// The prompt actually used for editing (refined or fallback)
    pub refined_prompt: String,
}
