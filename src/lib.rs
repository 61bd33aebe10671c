// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod edit;
pub mod prompt;

// Re-export main types
pub use api::errors::{ApiError, ErrorResponse};
pub use api::http_server::AppState;
pub use config::AppConfig;
pub use edit::client::{EditClient, EditOutcome, EditRequest, ImagePayload};
pub use prompt::compose::{compose, Mode};
pub use prompt::refine::{RefineClient, RefinementOutcome};
