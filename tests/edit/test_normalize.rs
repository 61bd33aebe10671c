// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response normalization tests

use photoreal_node::edit::client::EditOutcome;
use photoreal_node::edit::normalize::normalize;

#[test]
fn test_url_reference_unchanged() {
    let url = "https://oaidalleapiprodscus.blob.example/edited.png?sig=abc";
    assert_eq!(normalize(EditOutcome::Url(url.to_string())), url);
}

#[test]
fn test_inline_reference_round_trip() {
    // "AAAA" decodes to three zero bytes; re-encoding must reproduce it.
    let reference = normalize(EditOutcome::Inline {
        data: vec![0, 0, 0],
        mime: "image/png".to_string(),
    });
    assert_eq!(reference, "data:image/png;base64,AAAA");
}

#[test]
fn test_inline_reference_carries_mime_type() {
    let reference = normalize(EditOutcome::Inline {
        data: vec![1, 2, 3],
        mime: "image/webp".to_string(),
    });
    assert!(reference.starts_with("data:image/webp;base64,"));
}

#[test]
fn test_inline_empty_payload_still_well_formed() {
    let reference = normalize(EditOutcome::Inline {
        data: Vec::new(),
        mime: "image/png".to_string(),
    });
    assert_eq!(reference, "data:image/png;base64,");
}
