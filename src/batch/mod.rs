//! Batch mutation fan-out
//!
//! Applies one logical settings change to many entities, isolating
//! per-entity failure.
//!
//! # Design Principles
//!
//! - Fail fast on shared input: the settings payload is validated once,
//!   before any entity is touched
//! - Fail independently per entity: one id's failure is recorded and the
//!   rest proceed; applied successes are never rolled back
//! - The outcome is a closed structure with fixed fields, never a
//!   loosely-shaped map
//!
//! # Invariants Enforced
//!
//! - `success_count + failure_count == ids.len()` for every call,
//!   including the empty list
//! - One failure entry per failed id, none for succeeded ids, in input
//!   order

mod coordinator;
mod outcome;

pub use coordinator::{BatchMutationCoordinator, BatchUpdate};
pub use outcome::{BatchFailure, BatchOutcome};
