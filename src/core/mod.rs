//! # Mutation Core
//!
//! The one shared engineering concern of the service: concurrency-safe
//! mutation of versioned records. Every entity family (brands, stores,
//! reservation settings, packages) routes its writes through this module.
//!
//! ## Design Principles
//!
//! - Every mutable record is a [`VersionedEntity`] carrying a strictly
//!   monotonic version stamp
//! - Every single-entity write goes through [`ConcurrencyGuard::attempt`],
//!   which performs a compare-and-swap on the version
//! - The version comparison is strict equality, never greater-or-equal
//! - Exactly one persisted write occurs on an applied mutation; zero
//!   writes occur on conflict, rejection, or missing entity
//!
//! ## Invariants Enforced
//!
//! - Versions increase by exactly 1 per accepted write
//! - No two successful writes to the same id observe the same pre-write
//!   version
//! - A conflict outcome carries the live entity so the caller can
//!   reconcile without a second round trip

mod entity;
mod errors;
mod guard;

pub use entity::{EntityId, Version, VersionedEntity};
pub use errors::{ErrorKind, MutationError, MutationResult};
pub use guard::{AttemptOutcome, ConcurrencyGuard};
