// Domain error types - typed failures from the store, no user-facing text

use thiserror::Error;

use crate::core::models::{CardId, RecordKind};

/// Caller-supplied input failed a precondition
///
/// Always recoverable by correcting the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title required")]
    TitleRequired,

    #[error("content required")]
    ContentRequired,

    #[error("header required")]
    HeaderRequired,

    /// Body was not JSON of the expected shape
    #[error("malformed body: {detail}")]
    MalformedBody { detail: String },

    /// Every unresolved id from the request, in the order supplied
    #[error("invalid card reference")]
    InvalidCardReference { unresolved: Vec<CardId> },
}

/// Failure returned by a store operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind} with id {id} not found")]
    NotFound { kind: RecordKind, id: String },
}

impl StoreError {
    pub fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or wrong bearer token (HTTP 401)
    #[error("Unauthorized request")]
    Unauthorized,

    /// Store rejected the operation (HTTP 400 / 404)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration error (HTTP 500)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ServiceError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Unauthorized => 401,
            ServiceError::Store(StoreError::Validation(_)) => 400,
            ServiceError::Store(StoreError::NotFound { .. }) => 404,
            ServiceError::ConfigurationError(_) => 500,
        }
    }

    /// Get user-facing error message (no internal detail)
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Unauthorized => "Unauthorized request".to_string(),
            ServiceError::Store(StoreError::Validation(_)) => "Invalid data".to_string(),
            ServiceError::Store(StoreError::NotFound { kind, .. }) => match kind {
                RecordKind::Card => "Card Not Found".to_string(),
                RecordKind::List => "List Not Found".to_string(),
            },
            ServiceError::ConfigurationError(_) => "Internal error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::TitleRequired.to_string(), "title required");
        assert_eq!(ValidationError::ContentRequired.to_string(), "content required");
        assert_eq!(ValidationError::HeaderRequired.to_string(), "header required");
        let err = ValidationError::InvalidCardReference {
            unresolved: vec![CardId::from("nonexistent")],
        };
        assert_eq!(err.to_string(), "invalid card reference");

        let err = ValidationError::MalformedBody {
            detail: "expected a string".to_string(),
        };
        assert_eq!(err.to_string(), "malformed body: expected a string");
        assert_eq!(ServiceError::from(StoreError::from(err)).status_code(), 400);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ServiceError::Unauthorized.status_code(), 401);
        assert_eq!(
            ServiceError::from(StoreError::from(ValidationError::HeaderRequired)).status_code(),
            400
        );
        assert_eq!(
            ServiceError::from(StoreError::not_found(RecordKind::List, "x")).status_code(),
            404
        );
        assert_eq!(ServiceError::ConfigurationError("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_user_messages_no_internal_detail() {
        let err = ServiceError::ConfigurationError("API_TOKEN not set".to_string());
        assert_eq!(err.user_message(), "Internal error");

        let err = ServiceError::from(StoreError::from(ValidationError::InvalidCardReference {
            unresolved: vec![CardId::from("secret-looking-id")],
        }));
        assert_eq!(err.user_message(), "Invalid data");
    }

    #[test]
    fn test_not_found_message_names_kind() {
        let card = ServiceError::from(StoreError::not_found(RecordKind::Card, "c1"));
        let list = ServiceError::from(StoreError::not_found(RecordKind::List, "l1"));
        assert_eq!(card.user_message(), "Card Not Found");
        assert_eq!(list.user_message(), "List Not Found");
    }
}
