// Common test utilities and helpers for all test modules
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use card_service::api::{create_router, AppState};
use card_service::auth::audit_logger::AuditLogger;
use card_service::auth::auth_middleware::AuthState;
use card_service::config::Config;
use card_service::metrics::Metrics;
use card_service::store::InMemoryStore;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_TOKEN: &str = "test-api-token";

pub fn create_test_app_state(config: Config) -> AppState {
    AppState {
        store: Arc::new(InMemoryStore::new()),
        metrics: Arc::new(Metrics::new().unwrap()),
        config: Arc::new(config),
    }
}

/// Router wired exactly as in the binary, with `TEST_TOKEN` as the API token
pub fn test_app_with(app_state: AppState) -> Router {
    let auth_state = Arc::new(AuthState {
        api_token: app_state.config.api_token.clone(),
        audit_logger: Arc::new(AuditLogger::new(app_state.metrics.clone())),
    });
    create_router(&app_state, auth_state).with_state(app_state)
}

pub fn test_app() -> (Router, AppState) {
    let app_state = create_test_app_state(Config::test_config(TEST_TOKEN));
    (test_app_with(app_state.clone()), app_state)
}

pub fn authed(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TEST_TOKEN))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    authed(method, uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    authed(method, uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// POST /card and return the new id
pub async fn create_card(app: &Router, title: &str, content: &str) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/card",
            serde_json::json!({ "title": title, "content": content }),
        ),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// POST /list and return the new id
pub async fn create_list(app: &Router, header: &str, card_ids: &[&str]) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/list",
            serde_json::json!({ "header": header, "cardIds": card_ids }),
        ),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}
