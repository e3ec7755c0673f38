//! Entity storage seam
//!
//! The persistence boundary of the mutation core. The service does not
//! define a persistence engine; it defines the conditional-write contract
//! a store must provide, plus an in-memory reference implementation.
//!
//! # Design Principles
//!
//! - The check-then-write of a conditional update is atomic inside the
//!   store; the caller never holds a record "checked out" between read
//!   and write
//! - A store is an explicitly constructed value, injected into services;
//!   there is no process-wide implicit instance
//! - Multi-record group operations (new package version + retirement of
//!   the previous latest) land together or not at all

mod errors;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

use crate::core::{EntityId, MutationResult, Version, VersionedEntity};

/// Outcome of a conditional update inside the store.
#[derive(Debug, Clone)]
pub enum CasOutcome<P> {
    /// The mutation was applied; carries the updated entity.
    Applied(VersionedEntity<P>),
    /// The expected version did not match; carries the live entity.
    Conflict(VersionedEntity<P>),
    /// No record exists for the id. No write occurred.
    Missing,
    /// The mutation function itself rejected the update. No write occurred.
    Rejected(crate::core::MutationError),
}

/// Conditional-write contract every entity store must provide.
///
/// `compare_and_update` is the single serialization point for a record:
/// the version check and the write happen in one atomic region.
pub trait EntityStore<P>: Send + Sync {
    /// Returns a snapshot of the record, if present.
    fn get(&self, id: &EntityId) -> Option<VersionedEntity<P>>;

    /// Inserts a new record. Fails if the id is already present.
    fn insert(&self, entity: VersionedEntity<P>) -> StoreResult<VersionedEntity<P>>;

    /// Applies `mutate` to the record's payload if the version check passes.
    ///
    /// With `expected = Some(v)` the live version must equal `v` exactly;
    /// with `expected = None` the update applies against whatever version
    /// is live. Either way the accepted write bumps the version by exactly 1
    /// and stamps `updated_at`.
    fn compare_and_update(
        &self,
        id: &EntityId,
        expected: Option<Version>,
        mutate: &dyn Fn(&P) -> MutationResult<P>,
    ) -> CasOutcome<P>;

    /// Inserts `entity` and applies `mutate` to the `sibling` record in one
    /// atomic region. Neither write lands if the insert id already exists,
    /// the sibling is missing, or `mutate` rejects.
    fn insert_and_update(
        &self,
        entity: VersionedEntity<P>,
        sibling: &EntityId,
        mutate: &dyn Fn(&P) -> MutationResult<P>,
    ) -> StoreResult<VersionedEntity<P>>;
}
