//! # REST API Errors
//!
//! Error types for the REST API module and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::{ErrorKind, MutationError};

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    /// Mutation outcome that maps onto a client-visible status
    #[error("{0}")]
    Mutation(#[from] MutationError),

    /// Invalid request body
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Mutation(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::VersionConflict => StatusCode::CONFLICT,
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::InvalidTransition => StatusCode::UNPROCESSABLE_ENTITY,
            },
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the stable error code string for the response body
    pub fn code(&self) -> &'static str {
        match self {
            RestError::Mutation(err) => err.kind().as_str(),
            RestError::InvalidBody(_) => "INVALID_BODY",
        }
    }
}

/// Error response body
///
/// `current_version` and `current_payload` are present only on version
/// conflicts, so a conflict is never mistaken for a generic failure.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_payload: Option<Value>,
}

impl From<&RestError> for ErrorResponse {
    fn from(err: &RestError) -> Self {
        let (current_version, current_payload) = match err {
            RestError::Mutation(MutationError::VersionConflict {
                live, live_payload, ..
            }) => (Some(live.value()), Some(live_payload.clone())),
            _ => (None, None),
        };
        Self {
            error: err.to_string(),
            code: err.code(),
            current_version,
            current_payload,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityId, Version};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::Mutation(MutationError::not_found(&EntityId::from("x"))).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::Mutation(MutationError::validation("bad")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::Mutation(MutationError::invalid_transition("no")).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            RestError::InvalidBody("oops".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_conflict_body_carries_live_record() {
        let err = RestError::Mutation(MutationError::VersionConflict {
            id: EntityId::from("s-1"),
            supplied: Version::new(3),
            live: Version::new(4),
            live_payload: serde_json::json!({"name": "Midtown"}),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, "VERSION_CONFLICT");
        assert_eq!(body.current_version, Some(4));
        assert_eq!(body.current_payload, Some(serde_json::json!({"name": "Midtown"})));
    }

    #[test]
    fn test_non_conflict_body_has_no_live_record() {
        let err = RestError::Mutation(MutationError::validation("bad"));
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, "VALIDATION_ERROR");
        assert!(body.current_version.is_none());
        assert!(body.current_payload.is_none());
    }
}
