//! Concurrency guard
//!
//! The single tested implementation of the version-equality check. Every
//! entity family routes its writes through `attempt` (strict CAS) or
//! `attempt_latest` (apply against the live version, used by batch
//! fan-out where the intent is "set to this value regardless of prior
//! value").

use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;

use crate::store::{CasOutcome, EntityStore};

use super::entity::{EntityId, Version, VersionedEntity};
use super::errors::{MutationError, MutationResult};

/// Result of a guarded mutation attempt.
#[derive(Debug, Clone)]
pub enum AttemptOutcome<P> {
    /// Mutation applied; exactly one persisted write occurred.
    Applied(VersionedEntity<P>),
    /// Supplied version was stale; carries the live entity. No write.
    Conflict(VersionedEntity<P>),
    /// No live record for the id. No write.
    NotFound,
    /// The mutation function rejected the update. No write.
    Rejected(MutationError),
}

impl<P: Serialize> AttemptOutcome<P> {
    /// Collapses the outcome into a `MutationResult`, encoding the live
    /// entity into the conflict error so callers one layer up can report
    /// it without re-reading.
    pub fn into_result(
        self,
        id: &EntityId,
        supplied: Version,
    ) -> MutationResult<VersionedEntity<P>> {
        match self {
            Self::Applied(entity) => Ok(entity),
            Self::Conflict(live) => Err(MutationError::VersionConflict {
                id: id.clone(),
                supplied,
                live: live.version,
                live_payload: serde_json::to_value(&live.payload).unwrap_or(Value::Null),
            }),
            Self::NotFound => Err(MutationError::not_found(id)),
            Self::Rejected(err) => Err(err),
        }
    }
}

/// Compare-and-swap gate in front of an entity store.
///
/// Holds no state of its own; correctness comes from the store's atomic
/// conditional update, not from mutual exclusion here.
pub struct ConcurrencyGuard<'s, P, S: EntityStore<P>> {
    store: &'s S,
    _payload: PhantomData<P>,
}

impl<'s, P, S: EntityStore<P>> ConcurrencyGuard<'s, P, S> {
    /// Creates a guard over the given store.
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            _payload: PhantomData,
        }
    }

    /// Attempts a mutation against an exact version.
    ///
    /// The live stored version must equal `supplied` exactly; a caller
    /// holding any older version is rejected with the live entity, even if
    /// no intervening conflict existed from its own perspective. This
    /// forces every writer to have observed the truly latest state.
    pub fn attempt<F>(&self, id: &EntityId, supplied: Version, mutate: F) -> AttemptOutcome<P>
    where
        F: Fn(&P) -> P,
    {
        self.attempt_checked(id, supplied, |payload| Ok(mutate(payload)))
    }

    /// Attempts a mutation whose transform can itself reject (lifecycle
    /// transitions, payload validation against current state).
    ///
    /// The transform runs inside the store's atomic region, so its checks
    /// hold for the exact state being replaced.
    pub fn attempt_checked<F>(
        &self,
        id: &EntityId,
        supplied: Version,
        mutate: F,
    ) -> AttemptOutcome<P>
    where
        F: Fn(&P) -> MutationResult<P>,
    {
        match self.store.compare_and_update(id, Some(supplied), &mutate) {
            CasOutcome::Applied(entity) => AttemptOutcome::Applied(entity),
            CasOutcome::Conflict(live) => AttemptOutcome::Conflict(live),
            CasOutcome::Missing => AttemptOutcome::NotFound,
            CasOutcome::Rejected(err) => AttemptOutcome::Rejected(err),
        }
    }

    /// Applies a mutation against whatever version is live.
    ///
    /// Still a single atomic store write with a version bump; only the
    /// equality precondition is waived. This is the batch fan-out path.
    pub fn attempt_latest<F>(&self, id: &EntityId, mutate: F) -> AttemptOutcome<P>
    where
        F: Fn(&P) -> MutationResult<P>,
    {
        match self.store.compare_and_update(id, None, &mutate) {
            CasOutcome::Applied(entity) => AttemptOutcome::Applied(entity),
            // Unreachable without an expected version, but kept total.
            CasOutcome::Conflict(live) => AttemptOutcome::Conflict(live),
            CasOutcome::Missing => AttemptOutcome::NotFound,
            CasOutcome::Rejected(err) => AttemptOutcome::Rejected(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn seeded(value: u32) -> (MemoryStore<u32>, EntityId) {
        let store = MemoryStore::new();
        let id = EntityId::from("e-1");
        store
            .insert(VersionedEntity::new(id.clone(), value))
            .unwrap();
        (store, id)
    }

    #[test]
    fn test_attempt_applies_and_bumps_version() {
        let (store, id) = seeded(10);
        let guard = ConcurrencyGuard::new(&store);

        let outcome = guard.attempt(&id, Version::INITIAL, |v| v + 1);
        match outcome {
            AttemptOutcome::Applied(entity) => {
                assert_eq!(entity.payload, 11);
                assert_eq!(entity.version, Version::new(2));
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[test]
    fn test_attempt_stale_version_conflicts_with_live_entity() {
        let (store, id) = seeded(10);
        let guard = ConcurrencyGuard::new(&store);
        guard.attempt(&id, Version::INITIAL, |v| v + 1);

        let outcome = guard.attempt(&id, Version::INITIAL, |v| v + 100);
        match outcome {
            AttemptOutcome::Conflict(live) => {
                assert_eq!(live.version, Version::new(2));
                assert_eq!(live.payload, 11);
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
        // Loser's transform never landed.
        assert_eq!(store.get(&id).unwrap().payload, 11);
    }

    #[test]
    fn test_attempt_unknown_id_is_not_found() {
        let store: MemoryStore<u32> = MemoryStore::new();
        let guard = ConcurrencyGuard::new(&store);

        let outcome = guard.attempt(&EntityId::from("ghost"), Version::INITIAL, |v| *v);
        assert!(matches!(outcome, AttemptOutcome::NotFound));
    }

    #[test]
    fn test_into_result_encodes_conflict() {
        let (store, id) = seeded(10);
        let guard = ConcurrencyGuard::new(&store);
        guard.attempt(&id, Version::INITIAL, |v| v + 1);

        let err = guard
            .attempt(&id, Version::INITIAL, |v| *v)
            .into_result(&id, Version::INITIAL)
            .unwrap_err();
        match err {
            MutationError::VersionConflict {
                supplied,
                live,
                live_payload,
                ..
            } => {
                assert_eq!(supplied, Version::new(1));
                assert_eq!(live, Version::new(2));
                assert_eq!(live_payload, serde_json::json!(11));
            }
            other => panic!("expected VersionConflict, got {other:?}"),
        }
    }

    #[test]
    fn test_attempt_latest_never_conflicts() {
        let (store, id) = seeded(10);
        let guard = ConcurrencyGuard::new(&store);
        guard.attempt(&id, Version::INITIAL, |v| v + 1);

        let outcome = guard.attempt_latest(&id, |_| Ok(50));
        match outcome {
            AttemptOutcome::Applied(entity) => {
                assert_eq!(entity.payload, 50);
                assert_eq!(entity.version, Version::new(3));
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }
}
