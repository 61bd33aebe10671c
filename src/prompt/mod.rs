// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod compose;
pub mod refine;

pub use compose::{compose, Mode};
pub use refine::{RefineClient, RefinementOutcome};
