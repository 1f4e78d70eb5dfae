// Real integration tests for the bearer-token gate

#[path = "common/mod.rs"]
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;

use common::*;

#[tokio::test]
async fn test_missing_authorization_returns_401() {
    let (app, app_state) = test_app();

    let request = Request::builder().uri("/card").body(Body::empty()).unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "Unauthorized request" }));
    assert_eq!(app_state.metrics.auth_rejections.get(), 1);
}

#[tokio::test]
async fn test_wrong_token_returns_401() {
    let (app, _) = test_app();

    let request = Request::builder()
        .uri("/list")
        .header(header::AUTHORIZATION, "Bearer not-the-token")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_without_scheme_returns_401() {
    let (app, _) = test_app();

    let request = Request::builder()
        .uri("/card")
        .header(header::AUTHORIZATION, TEST_TOKEN)
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rejected_request_never_reaches_store() {
    let (app, app_state) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/card")
        .header(header::AUTHORIZATION, "Bearer wrong")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "title": "t", "content": "c" }).to_string()))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app_state.store.counts().await.cards, 0);
}

#[tokio::test]
async fn test_valid_token_is_admitted() {
    let (app, _) = test_app();
    let response = send(&app, empty_request("GET", "/card")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_public_endpoints_bypass_auth() {
    let (app, _) = test_app();
    for uri in ["/health", "/metrics"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK, "{} should not need a token", uri);
    }
}
