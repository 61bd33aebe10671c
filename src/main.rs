// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use photoreal_node::{api::http_server::start_server, AppConfig, AppState};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    if config.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; outbound calls will be rejected upstream");
    }
    tracing::info!(
        "Starting photoreal node: refine_model={}, image_model={}, timeout={:?}",
        config.refine_model,
        config.image_model,
        config.request_timeout
    );

    let state = AppState::new(config)?;
    start_server(state).await
}
