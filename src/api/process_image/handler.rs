// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image processing endpoint handler

use axum::extract::{Multipart, State};
use axum::Json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::request::UploadRequest;
use super::response::ProcessImageResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::edit::client::EditRequest;
use crate::edit::normalize::normalize;
use crate::prompt::compose::compose;

/// POST /v1/images/process - Edit an uploaded image guided by a refined prompt
///
/// Pipeline:
/// 1. Extract and validate the multipart upload
/// 2. Compose the instruction prompt for the requested mode
/// 3. Refine the prompt via the text-generation service
///    (failure degrades to the composed prompt, never aborts)
/// 4. Submit image, optional mask, and final prompt to the edit service
/// 5. Normalize the response into a single image reference
///
/// The whole pipeline runs under one wall-clock ceiling. On timeout the
/// per-request cancellation token stops in-flight outbound work and the
/// caller gets a 504.
pub async fn process_image_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProcessImageResponse>, ApiError> {
    let cancel = CancellationToken::new();
    let ceiling = state.config.request_timeout;

    match tokio::time::timeout(ceiling, run_pipeline(&state, multipart, &cancel)).await {
        Ok(result) => result.map(Json),
        Err(_) => {
            cancel.cancel();
            warn!("Image processing exceeded {:?} ceiling", ceiling);
            Err(ApiError::Timeout)
        }
    }
}

async fn run_pipeline(
    state: &AppState,
    multipart: Multipart,
    cancel: &CancellationToken,
) -> Result<ProcessImageResponse, ApiError> {
    // Validating
    let raw = UploadRequest::from_multipart(multipart).await?;
    let upload = raw.validate()?;
    debug!(
        "Upload accepted: mode={}, image={} bytes, mask={}, prompt_len={}",
        upload.mode.as_str(),
        upload.image.size(),
        upload.mask.is_some(),
        upload.user_additions.len()
    );

    // Composing
    let composed = compose(upload.mode, &upload.user_additions);

    // Refining; failure here falls back to the composed prompt
    let outcome = state.refine.refine(&composed, cancel).await;
    let final_prompt = outcome.into_text();

    // Editing
    let edit_request = EditRequest {
        prompt: final_prompt.clone(),
        image: upload.image,
        mask: upload.mask,
        prefer_inline: state.config.prefer_inline_image,
    };
    let edit_outcome = state.edit.edit(&edit_request, cancel).await?;

    // Normalizing
    let image = normalize(edit_outcome);

    info!(
        "Image processed: mode={}, prompt={} chars, inline={}",
        upload.mode.as_str(),
        final_prompt.len(),
        image.starts_with("data:")
    );

    Ok(ProcessImageResponse {
        image,
        refined_prompt: final_prompt,
    })
}
