// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image processing endpoint: validate, compose, refine, edit, normalize

pub mod handler;
pub mod request;
pub mod response;

pub use handler::process_image_handler;
pub use request::{UploadRequest, ValidUpload, MAX_UPLOAD_BYTES};
pub use response::ProcessImageResponse;
