// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error taxonomy for the image processing endpoint
//!
//! Every failure degrades to a single JSON envelope `{ "error": message }`.
//! Internal diagnostic detail stays in the logs; only the message reaches
//! the caller. Refinement failure is deliberately absent here: it is
//! recovered internally via the composed-prompt fallback and never surfaced.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Caller-facing JSON error envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Caller input malformed; always 400, recoverable by fixing input
    #[error("{0}")]
    Validation(String),

    /// The edit service rejected the request; its own status and message
    /// are passed through so the caller can tell client- from service-side
    /// failure
    #[error("{message}")]
    UpstreamEdit { message: String, status: u16 },

    /// The edit service reported success but returned no usable image
    #[error("{0}")]
    Normalization(String),

    /// Network-level failure on an outbound call
    #[error("{0}")]
    Transport(String),

    /// The per-request wall-clock ceiling was exceeded
    #[error("Request timed out")]
    Timeout,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamEdit { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Normalization(_) | ApiError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
