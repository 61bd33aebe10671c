// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload request extraction and validation

use axum::extract::Multipart;
use bytes::Bytes;

use crate::api::errors::ApiError;
use crate::edit::client::ImagePayload;
use crate::prompt::compose::Mode;

/// Byte ceiling for the uploaded image
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024; // ~4 MB

const DEFAULT_IMAGE_NAME: &str = "upload.png";
const DEFAULT_MASK_NAME: &str = "mask.png";
const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// The raw multipart fields of one upload. Image and mask bytes are captured
/// once into immutable buffers at extraction; validation and submission both
/// read the same buffers, never a stream that can be exhausted.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub image: Option<ImagePayload>,
    pub mask: Option<ImagePayload>,
    pub user_additions: String,
    pub mode: Option<String>,
}

/// A structurally valid upload, ready for the pipeline
#[derive(Debug, Clone)]
pub struct ValidUpload {
    pub image: ImagePayload,
    pub mask: Option<ImagePayload>,
    pub user_additions: String,
    pub mode: Mode,
}

impl UploadRequest {
    /// Drain the multipart body into an UploadRequest. Unknown fields are
    /// ignored; read failures on a field are reported as validation errors.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut image = None;
        let mut mask = None;
        let mut user_additions = String::new();
        let mut mode = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => {
                    image = Some(read_image_field(field, DEFAULT_IMAGE_NAME).await?);
                }
                "mask" => {
                    mask = Some(read_image_field(field, DEFAULT_MASK_NAME).await?);
                }
                "prompt" => {
                    user_additions = field
                        .text()
                        .await
                        .map_err(|e| {
                            ApiError::Validation(format!("Could not read prompt field: {}", e))
                        })?
                        .trim()
                        .to_string();
                }
                "mode" => {
                    mode = Some(field.text().await.map_err(|e| {
                        ApiError::Validation(format!("Could not read mode field: {}", e))
                    })?);
                }
                _ => {}
            }
        }

        Ok(Self {
            image,
            mask,
            user_additions,
            mode,
        })
    }

    /// Check structural validity. Checks run in order and short-circuit;
    /// the mask is optional and passed through unchecked beyond presence.
    /// Validating an already-valid request never errors.
    pub fn validate(&self) -> Result<ValidUpload, ApiError> {
        let image = self
            .image
            .clone()
            .ok_or_else(|| ApiError::Validation("No image uploaded".to_string()))?;

        if image.size() == 0 {
            return Err(ApiError::Validation(
                "Uploaded file is empty. Please re-upload.".to_string(),
            ));
        }

        if image.size() > MAX_UPLOAD_BYTES {
            let megabytes = image.size() as f64 / 1024.0 / 1024.0;
            return Err(ApiError::Validation(format!(
                "Your file is {:.2} MB. This prototype accepts ~4 MB max. \
                 Please upload a smaller image or resize it.",
                megabytes
            )));
        }

        let mode = match self.mode.as_deref() {
            None => Mode::default(),
            Some(raw) => {
                Mode::parse(raw).ok_or_else(|| ApiError::Validation("Invalid mode".to_string()))?
            }
        };

        Ok(ValidUpload {
            image,
            mask: self.mask.clone(),
            user_additions: self.user_additions.clone(),
            mode,
        })
    }
}

async fn read_image_field(
    field: axum::extract::multipart::Field<'_>,
    default_name: &str,
) -> Result<ImagePayload, ApiError> {
    let filename = field
        .file_name()
        .filter(|n| !n.is_empty())
        .unwrap_or(default_name)
        .to_string();
    let content_type = field
        .content_type()
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    let data: Bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::Validation(format!("Could not read uploaded file: {}", e)))?;

    Ok(ImagePayload {
        data,
        filename,
        content_type,
    })
}
