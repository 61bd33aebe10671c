// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Environment-based configuration for the image processing node

use std::env;
use std::time::Duration;

/// Default OpenAI-compatible API base URL
const DEFAULT_API_BASE: &str = "https://api.openai.com";

/// Process-wide configuration, built once at startup and never mutated
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token for both outbound services
    pub api_key: String,

    /// Base URL of the text-generation (prompt refinement) service
    pub refine_endpoint: String,

    /// Base URL of the image-editing service
    pub edit_endpoint: String,

    /// Model used for prompt refinement
    pub refine_model: String,

    /// Model used for image editing
    pub image_model: String,

    /// Wall-clock ceiling for one request, covering both outbound calls
    pub request_timeout: Duration,

    /// HTTP listen port
    pub api_port: u16,

    /// When true, ask the edit service for an inline base64 payload
    /// instead of a hosted URL
    pub prefer_inline_image: bool,
}

impl AppConfig {
    /// Build configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let api_base =
            env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let refine_endpoint =
            env::var("REFINE_API_BASE").unwrap_or_else(|_| api_base.clone());
        let edit_endpoint = env::var("EDIT_API_BASE").unwrap_or_else(|_| api_base.clone());
        let refine_model =
            env::var("OPENAI_REFINE_MODEL").unwrap_or_else(|_| "gpt-5".to_string());
        let image_model =
            env::var("OPENAI_IMAGE_MODEL").unwrap_or_else(|_| "gpt-image-1".to_string());
        let timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let prefer_inline_image = env::var("PREFER_INLINE_IMAGE")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Self {
            api_key,
            refine_endpoint,
            edit_endpoint,
            refine_model,
            image_model,
            request_timeout: Duration::from_secs(timeout_secs),
            api_port,
            prefer_inline_image,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            refine_endpoint: DEFAULT_API_BASE.to_string(),
            edit_endpoint: DEFAULT_API_BASE.to_string(),
            refine_model: "gpt-5".to_string(),
            image_model: "gpt-image-1".to_string(),
            request_timeout: Duration::from_secs(60),
            api_port: 8080,
            prefer_inline_image: false,
        }
    }
}
