//! Versioned entity primitives
//!
//! Every mutable record in the service is a `VersionedEntity`: an opaque
//! id, a version stamp, and an entity-specific payload. The version stamp
//! is the sole concurrency-control token; there is no in-process locking
//! of records between read and write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique identifier for a versioned entity.
///
/// Generated ids are UUIDv4; externally supplied ids are accepted as-is
/// (reservation settings reuse their store's id, for example).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Version stamp of an entity.
///
/// Starts at [`Version::INITIAL`] on creation and increases by exactly 1
/// per accepted write. Comparison on the write path is strict equality:
/// a writer holding any stale version is rejected, even if no conflicting
/// write was visible from its own perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// The version assigned to a freshly created entity.
    pub const INITIAL: Version = Version(1);

    /// Creates a version from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the version produced by one accepted write on top of this one.
    #[inline]
    pub fn next(&self) -> Version {
        Version(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record carrying a monotonically increasing version stamp alongside
/// its business payload.
///
/// The `updated_at` timestamp moves on every accepted write; `created_at`
/// never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedEntity<P> {
    pub id: EntityId,
    pub version: Version,
    pub payload: P,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<P> VersionedEntity<P> {
    /// Creates a new entity at the initial version.
    pub fn new(id: EntityId, payload: P) -> Self {
        let now = Utc::now();
        Self {
            id,
            version: Version::INITIAL,
            payload,
            created_at: now,
            updated_at: now,
        }
    }
}
