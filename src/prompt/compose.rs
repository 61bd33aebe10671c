// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Edit modes and deterministic prompt composition

/// Base instructions for the `enhance` mode
const ENHANCE_TEMPLATE: &str = "\
Render this screenshot as if it were an ultra-realistic photograph.
Stay true to the original image in terms of structure, geometry, materials, and camera angle.
Have a bright and clear image like a high-quality photograph.
The image should be in the same format as attached.
Do not change any shapes or forms in the image — keep everything the EXACT same!";

/// Base instructions for the `staging` mode
const STAGING_TEMPLATE: &str = "\
Render this screenshot as if it were an ultra-realistic photograph.
Stay true to the original image in terms of structure, geometry, materials, and camera angle.
Keep everything EXACT the same unless explicitly staged.
Add tasteful, photorealistic furniture only in the transparent mask areas.
Maintain bright, clear photographic quality.";

/// Base instructions for the `design` mode
const DESIGN_TEMPLATE: &str = "\
Render this screenshot as if it were an ultra-realistic photograph.
Stay true to the original image in terms of structure, geometry, and camera angle.
Keep everything EXACT the same except in the transparent mask areas,
where you apply the requested design or material changes.
Ensure the result looks like a high-quality professional photo.";

/// Instructions for the refinement model, identical across modes
const REFINE_PREAMBLE: &str = "\
Combine the BASE INSTRUCTIONS and USER ADDITIONS into a single polished prompt.";

/// Invariants the downstream edit model must respect, identical across modes
const HARD_RULES: &str = "\
HARD RULES:
Keep geometry, perspective, lighting, and all non-transparent (masked) areas unchanged.
Preserve camera angle and materials outside the mask.
Only modify the transparent mask regions.";

/// Marker used in place of user additions when the caller supplied none
const USER_PLACEHOLDER: &str = "(none)";

/// Closed set of supported edit modes; each maps one-to-one to a base
/// instruction template fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Enhance,
    Staging,
    Design,
}

impl Mode {
    /// Parse a mode string, case-insensitively. Returns None for anything
    /// outside the closed set.
    pub fn parse(s: &str) -> Option<Mode> {
        match s.trim().to_lowercase().as_str() {
            "enhance" => Some(Mode::Enhance),
            "staging" => Some(Mode::Staging),
            "design" => Some(Mode::Design),
            _ => None,
        }
    }

    /// The base instruction template for this mode
    pub fn base_template(&self) -> &'static str {
        match self {
            Mode::Enhance => ENHANCE_TEMPLATE,
            Mode::Staging => STAGING_TEMPLATE,
            Mode::Design => DESIGN_TEMPLATE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Enhance => "enhance",
            Mode::Staging => "staging",
            Mode::Design => "design",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Enhance
    }
}

/// Compose the instruction text sent for refinement and used verbatim as
/// fallback when refinement fails. Pure and deterministic: identical inputs
/// always yield byte-identical output.
pub fn compose(mode: Mode, user_additions: &str) -> String {
    let user = user_additions.trim();
    let user_block = if user.is_empty() { USER_PLACEHOLDER } else { user };

    format!(
        "{}\n\nBASE:\n{}\n\nUSER:\n{}\n\n{}",
        REFINE_PREAMBLE,
        mode.base_template(),
        user_block,
        HARD_RULES
    )
}
