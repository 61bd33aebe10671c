// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt refinement client for the text-generation service
//!
//! Refinement is best-effort: any transport error, non-success status, or
//! unusable response body degrades to the composed prompt. Failures here are
//! logged for operators but never abort the request.

use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Final prompt for the edit stage: either text extracted from the
/// refinement service, or the composed prompt when refinement failed or
/// yielded nothing usable. Exactly one variant holds per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefinementOutcome {
    Refined(String),
    Fallback(String),
}

impl RefinementOutcome {
    pub fn text(&self) -> &str {
        match self {
            RefinementOutcome::Refined(text) => text,
            RefinementOutcome::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            RefinementOutcome::Refined(text) => text,
            RefinementOutcome::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RefinementOutcome::Fallback(_))
    }
}

/// Client for the prompt refinement service via OpenAI-compatible API
pub struct RefineClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model_name: String,
}

impl RefineClient {
    /// Create a new RefineClient
    pub fn new(endpoint: &str, api_key: &str, model_name: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Refine client configured: endpoint={}, model={}",
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

    /// Refine a composed prompt. Never fails: on any error the composed
    /// prompt is returned unchanged as the fallback.
    pub async fn refine(&self, composed: &str, cancel: &CancellationToken) -> RefinementOutcome {
        match self.try_refine(composed, cancel).await {
            Ok(Some(text)) => {
                debug!("Prompt refined: {} -> {} chars", composed.len(), text.len());
                RefinementOutcome::Refined(text)
            }
            Ok(None) => {
                warn!("Refinement response contained no usable text, using composed prompt");
                RefinementOutcome::Fallback(composed.to_string())
            }
            Err(e) => {
                warn!("Prompt refinement failed, using composed prompt: {}", e);
                RefinementOutcome::Fallback(composed.to_string())
            }
        }
    }

    async fn try_refine(
        &self,
        composed: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>> {
        let body = serde_json::json!({
            "model": self.model_name,
            "input": composed,
        });

        let url = format!("{}/v1/responses", self.endpoint);
        debug!("Refine POST {}", url);

        let request = async {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                return Err(anyhow::anyhow!(
                    "refinement service returned {}: {}",
                    status,
                    text
                ));
            }

            let value: Value = response.json().await?;
            Ok(extract_output_text(&value))
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(anyhow::anyhow!("refinement call cancelled")),
            result = request => result,
        }
    }
}

/// Extract readable text from the union of response shapes the refinement
/// service is known to produce. Matchers are tried in order; the first
/// non-empty extraction wins.
pub fn extract_output_text(value: &Value) -> Option<String> {
    flat_output_text(value)
        .or_else(|| output_items_text(value))
        .or_else(|| chat_choice_text(value))
}

/// Shape 1: a direct flat `output_text` field
fn flat_output_text(value: &Value) -> Option<String> {
    non_empty(value.get("output_text")?.as_str()?)
}

/// Shape 2: `output` items, each with a `content` list; first entry whose
/// type tag contains "text" and whose text payload is non-empty
fn output_items_text(value: &Value) -> Option<String> {
    let items = value.get("output")?.as_array()?;
    items
        .iter()
        .filter_map(|item| item.get("content")?.as_array())
        .find_map(|content| first_text_entry(content))
}

/// Shape 3: a chat-style top-level choice, content either a direct string
/// or a list scanned the same way as shape 2
fn chat_choice_text(value: &Value) -> Option<String> {
    let content = value
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?;

    match content {
        Value::String(s) => non_empty(s),
        Value::Array(entries) => first_text_entry(entries),
        _ => None,
    }
}

fn first_text_entry(entries: &[Value]) -> Option<String> {
    entries.iter().find_map(|entry| {
        let type_tag = entry.get("type")?.as_str()?;
        if !type_tag.contains("text") {
            return None;
        }
        non_empty(entry.get("text")?.as_str()?)
    })
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
