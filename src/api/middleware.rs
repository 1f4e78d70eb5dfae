// Middleware stack for observability, hardening and failure handling

use std::any::Any;

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde_json::json;
use tower_http::{
    catch_panic::{CatchPanicLayer, ResponseForPanic},
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::error;

use crate::api::responses::ErrorResponse;

/// HTTP request logging (method, path, status, latency)
pub fn tracing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// Returns 413 Payload Too Large when a body exceeds `limit` bytes
pub fn body_size_limit_layer(limit: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(limit)
}

/// Any origin, any method, any header
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Response headers set on every reply unless a handler already set them
pub fn security_headers() -> Vec<(HeaderName, HeaderValue)> {
    vec![
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (header::X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off")),
        (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
    ]
}

/// Converts errors raised by the timeout layer into HTTP responses
pub async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<ErrorResponse>) {
    let status = if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Turns a handler panic into a 500
///
/// In production the body is a fixed `server error` message; elsewhere it
/// carries the panic message.
#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    production: bool,
}

impl PanicResponder {
    pub fn new(production: bool) -> Self {
        Self { production }
    }
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = axum::body::Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response {
        let detail = panic_message(err.as_ref());
        error!(error = %detail, "Unhandled failure while serving request");

        let body = if self.production {
            json!({ "error": { "message": "server error" } })
        } else {
            json!({ "message": detail, "error": detail })
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub fn catch_panic_layer(production: bool) -> CatchPanicLayer<PanicResponder> {
    CatchPanicLayer::custom(PanicResponder::new(production))
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}
