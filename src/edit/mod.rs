// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod client;
pub mod normalize;

pub use client::{EditClient, EditOutcome, EditRequest, ImagePayload};
pub use normalize::normalize;
