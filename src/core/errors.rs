//! Mutation error taxonomy
//!
//! One closed error type shared by every entity family, so consumers can
//! distinguish the recovery action: a conflict means reload-and-reapply,
//! a validation failure means fix the input, a missing entity means
//! navigate away.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::entity::{EntityId, Version};

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Machine-readable discriminant of a [`MutationError`].
///
/// This is the value reported per-id in batch failure entries and as the
/// stable `code` field of HTTP error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    VersionConflict,
    Validation,
    InvalidTransition,
}

impl ErrorKind {
    /// Returns the stable string code for API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::VersionConflict => "VERSION_CONFLICT",
            Self::Validation => "VALIDATION_ERROR",
            Self::InvalidTransition => "INVALID_TRANSITION",
        }
    }
}

/// Errors produced by mutation attempts.
///
/// `VersionConflict` carries the live version and a snapshot of the live
/// payload so the caller can reconcile without a second read.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MutationError {
    /// Referenced id has no live record.
    #[error("entity not found: {id}")]
    NotFound { id: EntityId },

    /// Supplied version does not match the live version.
    ///
    /// Recoverable by refetch-and-retry; never auto-retried here.
    #[error("version conflict on {id}: supplied {supplied}, live {live}")]
    VersionConflict {
        id: EntityId,
        supplied: Version,
        live: Version,
        live_payload: Value,
    },

    /// Payload violates a field-level invariant. Rejected before any
    /// persistence attempt.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Requested lifecycle transition is not allowed from the current
    /// status.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
}

impl MutationError {
    /// Creates a not-found error.
    pub fn not_found(id: &EntityId) -> Self {
        Self::NotFound { id: id.clone() }
    }

    /// Creates a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates an invalid-transition error.
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    /// Returns the machine-readable discriminant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::VersionConflict { .. } => ErrorKind::VersionConflict,
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidTransition(_) => ErrorKind::InvalidTransition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        assert_eq!(ErrorKind::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorKind::VersionConflict.as_str(), "VERSION_CONFLICT");
        assert_eq!(ErrorKind::Validation.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorKind::InvalidTransition.as_str(), "INVALID_TRANSITION");
    }

    #[test]
    fn test_kind_matches_variant() {
        let err = MutationError::not_found(&EntityId::from("x"));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = MutationError::validation("bad input");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_conflict_display_names_both_versions() {
        let err = MutationError::VersionConflict {
            id: EntityId::from("s-1"),
            supplied: Version::new(3),
            live: Version::new(4),
            live_payload: Value::Null,
        };
        let msg = err.to_string();
        assert!(msg.contains("supplied 3"));
        assert!(msg.contains("live 4"));
    }
}
