// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP server wiring: router, shared state, CORS, request tracing

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::process_image::process_image_handler;
use crate::config::AppConfig;
use crate::edit::client::EditClient;
use crate::prompt::refine::RefineClient;

/// Multipart bodies may carry an image and a mask, each up to the 4 MiB
/// validation cap, plus boundary overhead. Oversized images are still
/// rejected with the caller-facing message, not a bare 413.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared per-process state. The config and clients are immutable after
/// startup; requests share them by reference only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub refine: Arc<RefineClient>,
    pub edit: Arc<EditClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let refine = RefineClient::new(
            &config.refine_endpoint,
            &config.api_key,
            &config.refine_model,
        )?;
        let edit = EditClient::new(&config.edit_endpoint, &config.api_key, &config.image_model)?;

        Ok(Self {
            config: Arc::new(config),
            refine: Arc::new(refine),
            edit: Arc::new(edit),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/images/process", post(process_image_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(state: AppState) -> Result<()> {
    let port = state.config.api_port;
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
