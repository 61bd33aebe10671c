// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests for the image processing endpoint
//!
//! These tests verify that:
//! - /health responds
//! - /v1/images/process is registered and accepts POST only
//! - unknown routes return 404

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use photoreal_node::{api::http_server::create_app, AppConfig, AppState};
use tower::util::ServiceExt; // for `oneshot`

fn test_state() -> AppState {
    AppState::new(AppConfig::default()).expect("state should build from default config")
}

#[tokio::test]
async fn test_health_route_registered() {
    let app = create_app(test_state());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_process_route_rejects_get() {
    let app = create_app(test_state());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/images/process")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.status(),
        StatusCode::METHOD_NOT_ALLOWED,
        "GET requests should be rejected with 405"
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_app(test_state());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/images/generate")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_process_route_requires_multipart() {
    let app = create_app(test_state());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/images/process")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(
        response.status().is_client_error(),
        "non-multipart bodies should be rejected, got {}",
        response.status()
    );
}
