//! Storage seam errors

use thiserror::Error;

use crate::core::{EntityId, MutationError};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from store operations that are not plain conditional-update
/// outcomes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// Insert attempted with an id that already has a live record.
    #[error("duplicate id: {0}")]
    DuplicateId(EntityId),

    /// Group operation referenced a sibling record that does not exist.
    #[error("sibling record not found: {0}")]
    SiblingMissing(EntityId),

    /// The mutation function rejected the update; nothing was written.
    #[error(transparent)]
    Rejected(#[from] MutationError),
}

impl From<StoreError> for MutationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(id) => {
                MutationError::validation(format!("id already exists: {id}"))
            }
            StoreError::SiblingMissing(id) => MutationError::not_found(&id),
            StoreError::Rejected(inner) => inner,
        }
    }
}
