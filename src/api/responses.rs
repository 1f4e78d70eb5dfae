// Response types for API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::core::errors::{ServiceError, StoreError};

/// Body returned by the create endpoints
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub cards: usize,
    pub lists: usize,
}

/// API error type that converts domain errors to HTTP responses
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Create from ServiceError, keeping internal detail out of the body
    pub fn from_service_error(err: ServiceError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            message: err.user_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::from_service_error(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::from_service_error(ServiceError::Store(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ValidationError;
    use crate::core::models::RecordKind;

    #[test]
    fn test_store_errors_map_to_status() {
        let err = ApiError::from(StoreError::from(ValidationError::TitleRequired));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid data");

        let err = ApiError::from(StoreError::not_found(RecordKind::Card, "c1"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Card Not Found");
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let err = ApiError::from(ServiceError::Unauthorized);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Unauthorized request");
    }
}
