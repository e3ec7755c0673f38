//! Batch mutation coordinator

use std::marker::PhantomData;

use tracing::{debug, info, warn};

use crate::core::{AttemptOutcome, ConcurrencyGuard, EntityId, ErrorKind, MutationResult};
use crate::store::EntityStore;

use super::outcome::BatchOutcome;

/// A settings change that can be fanned out across many entities.
///
/// `validate` runs once against the shared input; `apply` produces each
/// entity's replacement payload. Batch intent is "set to this value
/// regardless of prior value," so `apply` typically ignores the current
/// payload.
pub trait BatchUpdate<P> {
    /// Validates the shared input. An error here rejects the whole batch
    /// before any entity is touched.
    fn validate(&self) -> MutationResult<()>;

    /// Produces the replacement payload for one entity.
    fn apply(&self, current: &P) -> P;
}

/// Fans a single logical update out across many entity ids, invoking the
/// concurrency guard per id and aggregating a partial-failure result.
pub struct BatchMutationCoordinator<'s, P, S: EntityStore<P>> {
    store: &'s S,
    _payload: PhantomData<P>,
}

impl<'s, P, S: EntityStore<P>> BatchMutationCoordinator<'s, P, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            _payload: PhantomData,
        }
    }

    /// Applies `update` to every id in `ids`.
    ///
    /// Sequential fan-out; failures are reported in input order. The
    /// returned outcome always satisfies
    /// `success_count + failure_count == ids.len()`. An empty id list is
    /// a no-op success, not an error.
    pub fn apply_batch<U: BatchUpdate<P>>(
        &self,
        ids: &[EntityId],
        update: &U,
    ) -> MutationResult<BatchOutcome> {
        // Shared input is validated exactly once, up front.
        update.validate()?;

        let guard = ConcurrencyGuard::new(self.store);
        let mut outcome = BatchOutcome::empty();

        for id in ids {
            match guard.attempt_latest(id, |current| Ok(update.apply(current))) {
                AttemptOutcome::Applied(entity) => {
                    debug!(id = %id, version = %entity.version, "batch update applied");
                    outcome.record_success();
                }
                AttemptOutcome::NotFound => {
                    warn!(id = %id, "batch update target not found");
                    outcome.record_failure(
                        id.clone(),
                        ErrorKind::NotFound,
                        format!("entity not found: {id}"),
                    );
                }
                AttemptOutcome::Rejected(err) => {
                    warn!(id = %id, error = %err, "batch update rejected");
                    outcome.record_failure(id.clone(), err.kind(), err.to_string());
                }
                AttemptOutcome::Conflict(live) => {
                    // Not produced by the unconditional path; recorded
                    // rather than dropped if a store ever returns it.
                    outcome.record_failure(
                        id.clone(),
                        ErrorKind::VersionConflict,
                        format!("live version is {}", live.version),
                    );
                }
            }
        }

        info!(
            requested = ids.len(),
            succeeded = outcome.success_count,
            failed = outcome.failure_count,
            "batch mutation complete"
        );
        Ok(outcome)
    }
}
