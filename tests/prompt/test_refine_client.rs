// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Refinement client tests
//!
//! Refinement must never fail the request: transport errors, non-success
//! statuses, and unusable bodies all degrade to the composed prompt.

use photoreal_node::prompt::compose::{compose, Mode};
use photoreal_node::prompt::refine::{extract_output_text, RefineClient, RefinementOutcome};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_unreachable_service_falls_back_to_composed_prompt() {
    let client = RefineClient::new("http://127.0.0.1:59999", "sk-test", "gpt-5").unwrap();
    let composed = compose(Mode::Enhance, "brighter windows");
    let cancel = CancellationToken::new();

    let outcome = client.refine(&composed, &cancel).await;

    // Fallback law: the prompt sent onward equals the composed prompt exactly.
    assert!(outcome.is_fallback());
    assert_eq!(outcome.text(), composed);
}

#[tokio::test]
async fn test_fallback_preserves_composed_prompt_for_every_mode() {
    let client = RefineClient::new("http://127.0.0.1:59999", "sk-test", "gpt-5").unwrap();
    let cancel = CancellationToken::new();

    for mode in [Mode::Enhance, Mode::Staging, Mode::Design] {
        let composed = compose(mode, "");
        let outcome = client.refine(&composed, &cancel).await;
        assert_eq!(
            outcome,
            RefinementOutcome::Fallback(composed.clone()),
            "fallback for {:?} must be the composed prompt",
            mode
        );
    }
}

#[tokio::test]
async fn test_cancelled_token_falls_back() {
    let client = RefineClient::new("http://127.0.0.1:59999", "sk-test", "gpt-5").unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = client.refine("composed text", &cancel).await;
    assert_eq!(
        outcome,
        RefinementOutcome::Fallback("composed text".to_string())
    );
}

// --- Response shape extraction ---

#[test]
fn test_extracts_flat_output_text_shape() {
    let value = serde_json::json!({
        "id": "resp_123",
        "output_text": "A single polished instruction."
    });
    assert_eq!(
        extract_output_text(&value).as_deref(),
        Some("A single polished instruction.")
    );
}

#[test]
fn test_extracts_nested_output_items_shape() {
    let value = serde_json::json!({
        "output": [
            {
                "type": "reasoning",
                "content": []
            },
            {
                "type": "message",
                "content": [
                    {"type": "output_text", "text": "Nested text wins."}
                ]
            }
        ]
    });
    assert_eq!(
        extract_output_text(&value).as_deref(),
        Some("Nested text wins.")
    );
}

#[test]
fn test_extracts_chat_style_shape() {
    let string_content = serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": "Chat string."}}]
    });
    assert_eq!(
        extract_output_text(&string_content).as_deref(),
        Some("Chat string.")
    );

    let array_content = serde_json::json!({
        "choices": [{"message": {"content": [
            {"type": "text", "text": "Chat array."}
        ]}}]
    });
    assert_eq!(
        extract_output_text(&array_content).as_deref(),
        Some("Chat array.")
    );
}

#[test]
fn test_shapes_tried_in_order() {
    // When several shapes are present, the flat field is preferred.
    let value = serde_json::json!({
        "output_text": "flat",
        "output": [{"content": [{"type": "output_text", "text": "items"}]}],
        "choices": [{"message": {"content": "chat"}}]
    });
    assert_eq!(extract_output_text(&value).as_deref(), Some("flat"));
}

#[test]
fn test_no_usable_text_yields_none() {
    assert_eq!(extract_output_text(&serde_json::json!({})), None);
    assert_eq!(
        extract_output_text(&serde_json::json!({"output_text": ""})),
        None
    );
    assert_eq!(
        extract_output_text(&serde_json::json!({
            "output": [{"content": [{"type": "image", "text": "not text typed"}]}]
        })),
        None
    );
}
