//! Partial-failure batch result

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, ErrorKind};

/// One failed id within a batch, reported against its originating id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub id: EntityId,
    pub kind: ErrorKind,
    pub message: String,
}

/// Aggregated result of a batch mutation.
///
/// Call-scoped value with no persisted lifecycle; it exists for one
/// request/response cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// The outcome of an empty batch: a no-op success.
    pub fn empty() -> Self {
        Self {
            success_count: 0,
            failure_count: 0,
            failures: Vec::new(),
        }
    }

    /// Records one applied id.
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    /// Records one failed id.
    pub fn record_failure(&mut self, id: EntityId, kind: ErrorKind, message: impl Into<String>) {
        self.failure_count += 1;
        self.failures.push(BatchFailure {
            id,
            kind,
            message: message.into(),
        });
    }

    /// Total number of ids this outcome accounts for.
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }
}
