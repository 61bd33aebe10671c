// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image edit client for the image-editing service
//!
//! The upload is held as an immutable byte buffer captured once at request
//! entry. Each submission builds a fresh multipart part from those bytes with
//! explicit filename and MIME type, so the payload is complete no matter how
//! many earlier stages inspected it.

use anyhow::Result;
use base64::Engine as _;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::errors::ApiError;

/// Target output size sent with every edit request
pub const TARGET_SIZE: &str = "1024x1024";

/// An uploaded image captured as raw bytes plus submission metadata
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
}

impl ImagePayload {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// One image edit submission
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub prompt: String,
    pub image: ImagePayload,
    pub mask: Option<ImagePayload>,
    /// Ask for an inline base64 payload instead of a hosted URL
    pub prefer_inline: bool,
}

/// The single image reference produced by the edit service; exactly one
/// variant is populated or the request fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Url(String),
    Inline { data: Vec<u8>, mime: String },
}

#[derive(Debug, Deserialize)]
struct EditResponseBody {
    #[serde(default)]
    data: Vec<EditResponseDatum>,
}

#[derive(Debug, Deserialize)]
struct EditResponseDatum {
    url: Option<String>,
    b64_json: Option<String>,
}

/// Client for the image-editing service via OpenAI-compatible API
pub struct EditClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model_name: String,
}

impl EditClient {
    /// Create a new EditClient
    pub fn new(endpoint: &str, api_key: &str, model_name: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Edit client configured: endpoint={}, model={}",
            endpoint, model_name
        );

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model_name: model_name.to_string(),
        })
    }

    /// Get the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Submit an edit request and return the single image reference the
    /// service produced. Upstream errors are passed through with the
    /// service's own status and message.
    pub async fn edit(
        &self,
        request: &EditRequest,
        cancel: &CancellationToken,
    ) -> Result<EditOutcome, ApiError> {
        let form = build_form(&self.model_name, request)?;

        let url = format!("{}/v1/images/edits", self.endpoint);
        debug!(
            "Edit POST {} (image={} bytes, mask={})",
            url,
            request.image.size(),
            request.mask.is_some()
        );

        let call = async {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .multipart(form)
                .send()
                .await
                .map_err(|e| ApiError::Transport(format!("image edit call failed: {}", e)))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(upstream_error(status.as_u16(), &body));
            }

            let value: Value = response
                .json()
                .await
                .map_err(|e| ApiError::Transport(format!("invalid edit response: {}", e)))?;
            outcome_from_response(value)
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(ApiError::Timeout),
            result = call => result,
        }
    }
}

/// Build the multipart form with freshly constructed byte parts. The parts
/// own independent copies of the upload bytes so the buffer can be
/// resubmitted any number of times.
fn build_form(model: &str, request: &EditRequest) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("model", model.to_string())
        .text("prompt", request.prompt.clone())
        .text("size", TARGET_SIZE.to_string());

    form = form.part("image", image_part(&request.image)?);
    if let Some(ref mask) = request.mask {
        form = form.part("mask", image_part(mask)?);
    }
    if request.prefer_inline {
        form = form.text("response_format", "b64_json");
    }

    Ok(form)
}

fn image_part(payload: &ImagePayload) -> Result<Part, ApiError> {
    Part::bytes(payload.data.to_vec())
        .file_name(payload.filename.clone())
        .mime_str(&payload.content_type)
        .map_err(|e| {
            ApiError::Validation(format!(
                "Invalid content type '{}': {}",
                payload.content_type, e
            ))
        })
}

/// Map a non-success upstream body to an error carrying the service's own
/// message and status code.
fn upstream_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| "Image edit failed".to_string());
    ApiError::UpstreamEdit { message, status }
}

/// Extract the single image reference from a success response. A populated
/// URL wins; otherwise the inline base64 payload is decoded. Neither present
/// is a normalization failure.
pub fn outcome_from_response(value: Value) -> Result<EditOutcome, ApiError> {
    let body: EditResponseBody = serde_json::from_value(value)
        .map_err(|e| ApiError::Transport(format!("invalid edit response: {}", e)))?;

    let first = body
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Normalization("No image returned from API".to_string()))?;

    if let Some(url) = first.url.filter(|u| !u.is_empty()) {
        return Ok(EditOutcome::Url(url));
    }

    if let Some(b64) = first.b64_json.filter(|b| !b.is_empty()) {
        let data = base64::engine::general_purpose::STANDARD
            .decode(b64.as_bytes())
            .map_err(|e| {
                ApiError::Normalization(format!("invalid base64 image payload: {}", e))
            })?;
        return Ok(EditOutcome::Inline {
            data,
            mime: "image/png".to_string(),
        });
    }

    Err(ApiError::Normalization(
        "No image returned from API".to_string(),
    ))
}
