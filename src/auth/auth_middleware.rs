// Axum authorization middleware

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::api::responses::ApiError;
use crate::auth::api_token::{ApiToken, TokenFingerprint};
use crate::auth::audit_logger::{AuditLogger, AuthEvent};
use crate::core::errors::ServiceError;

/// Authorization state shared by every protected route
#[derive(Clone)]
pub struct AuthState {
    pub api_token: ApiToken,
    pub audit_logger: Arc<AuditLogger>,
}

/// Bearer-token gate
///
/// Takes the second space-separated part of `Authorization` and compares it
/// with the configured token. Anything else is rejected with 401 before a
/// handler runs.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();

    let Some(presented) = extract_token(request.headers()) else {
        auth_state.audit_logger.log_auth_event(
            &AuthEvent::Rejected { reason: "missing token" },
            &path,
            None,
        );
        return Err(ServiceError::Unauthorized.into());
    };

    if !auth_state.api_token.matches(&presented) {
        let fingerprint = TokenFingerprint::of(&presented);
        auth_state.audit_logger.log_auth_event(
            &AuthEvent::Rejected { reason: "token mismatch" },
            &path,
            Some(&fingerprint),
        );
        return Err(ServiceError::Unauthorized.into());
    }

    auth_state
        .audit_logger
        .log_auth_event(&AuthEvent::Admitted, &path, None);
    Ok(next.run(request).await)
}

/// Token portion of a two-part `Authorization` value (`Bearer <token>`)
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(' ').nth(1))
        .map(|s| s.to_string())
}
