//! In-memory reference store
//!
//! A `RwLock<HashMap>` table. The write lock spans the entire
//! check-then-write of a conditional update, so the version comparison
//! and the write form a single atomic region, the property the mutation
//! core assumes of any real persistence layer.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use crate::core::{EntityId, MutationResult, Version, VersionedEntity};

use super::errors::{StoreError, StoreResult};
use super::{CasOutcome, EntityStore};

/// In-memory entity table keyed by id.
#[derive(Debug)]
pub struct MemoryStore<P> {
    records: RwLock<HashMap<EntityId, VersionedEntity<P>>>,
}

impl<P> Default for MemoryStore<P> {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<P> MemoryStore<P> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live records.
    pub fn len(&self) -> usize {
        self.read_table().len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_table(&self) -> std::sync::RwLockReadGuard<'_, HashMap<EntityId, VersionedEntity<P>>> {
        self.records.read().expect("entity table lock poisoned")
    }

    fn write_table(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<EntityId, VersionedEntity<P>>> {
        self.records.write().expect("entity table lock poisoned")
    }
}

impl<P: Clone + Send + Sync> EntityStore<P> for MemoryStore<P> {
    fn get(&self, id: &EntityId) -> Option<VersionedEntity<P>> {
        self.read_table().get(id).cloned()
    }

    fn insert(&self, entity: VersionedEntity<P>) -> StoreResult<VersionedEntity<P>> {
        let mut table = self.write_table();
        if table.contains_key(&entity.id) {
            return Err(StoreError::DuplicateId(entity.id));
        }
        table.insert(entity.id.clone(), entity.clone());
        Ok(entity)
    }

    fn compare_and_update(
        &self,
        id: &EntityId,
        expected: Option<Version>,
        mutate: &dyn Fn(&P) -> MutationResult<P>,
    ) -> CasOutcome<P> {
        let mut table = self.write_table();
        let Some(record) = table.get_mut(id) else {
            return CasOutcome::Missing;
        };

        if let Some(expected) = expected {
            // Strict equality: any stale version is a conflict.
            if record.version != expected {
                return CasOutcome::Conflict(record.clone());
            }
        }

        match mutate(&record.payload) {
            Ok(payload) => {
                record.payload = payload;
                record.version = record.version.next();
                record.updated_at = Utc::now();
                CasOutcome::Applied(record.clone())
            }
            Err(err) => CasOutcome::Rejected(err),
        }
    }

    fn insert_and_update(
        &self,
        entity: VersionedEntity<P>,
        sibling: &EntityId,
        mutate: &dyn Fn(&P) -> MutationResult<P>,
    ) -> StoreResult<VersionedEntity<P>> {
        let mut table = self.write_table();
        if table.contains_key(&entity.id) {
            return Err(StoreError::DuplicateId(entity.id));
        }

        // Validate and prepare the sibling write before touching the table,
        // so a rejection leaves both records untouched.
        let sibling_record = table
            .get(sibling)
            .ok_or_else(|| StoreError::SiblingMissing(sibling.clone()))?;
        let new_sibling_payload = mutate(&sibling_record.payload)?;

        let sibling_record = table
            .get_mut(sibling)
            .ok_or_else(|| StoreError::SiblingMissing(sibling.clone()))?;
        sibling_record.payload = new_sibling_payload;
        sibling_record.version = sibling_record.version.next();
        sibling_record.updated_at = Utc::now();

        table.insert(entity.id.clone(), entity.clone());
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MutationError;

    fn seed(store: &MemoryStore<u32>, id: &str, value: u32) -> VersionedEntity<u32> {
        store
            .insert(VersionedEntity::new(EntityId::from(id), value))
            .unwrap()
    }

    #[test]
    fn test_insert_then_get_round_trips() {
        let store = MemoryStore::new();
        seed(&store, "a", 7);

        let got = store.get(&EntityId::from("a")).unwrap();
        assert_eq!(got.payload, 7);
        assert_eq!(got.version, Version::INITIAL);
    }

    #[test]
    fn test_insert_duplicate_id_fails() {
        let store = MemoryStore::new();
        seed(&store, "a", 1);

        let err = store
            .insert(VersionedEntity::new(EntityId::from("a"), 2))
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(EntityId::from("a")));
        // Original record untouched.
        assert_eq!(store.get(&EntityId::from("a")).unwrap().payload, 1);
    }

    #[test]
    fn test_cas_applies_on_exact_version() {
        let store = MemoryStore::new();
        seed(&store, "a", 1);

        let outcome =
            store.compare_and_update(&EntityId::from("a"), Some(Version::INITIAL), &|v| Ok(v + 1));
        match outcome {
            CasOutcome::Applied(entity) => {
                assert_eq!(entity.payload, 2);
                assert_eq!(entity.version, Version::INITIAL.next());
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[test]
    fn test_cas_conflict_on_stale_version() {
        let store = MemoryStore::new();
        seed(&store, "a", 1);
        store.compare_and_update(&EntityId::from("a"), Some(Version::INITIAL), &|v| Ok(v + 1));

        let outcome =
            store.compare_and_update(&EntityId::from("a"), Some(Version::INITIAL), &|v| Ok(v + 1));
        match outcome {
            CasOutcome::Conflict(live) => {
                assert_eq!(live.version, Version::INITIAL.next());
                assert_eq!(live.payload, 2);
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_cas_missing_id() {
        let store: MemoryStore<u32> = MemoryStore::new();
        let outcome = store.compare_and_update(&EntityId::from("nope"), None, &|v| Ok(*v));
        assert!(matches!(outcome, CasOutcome::Missing));
    }

    #[test]
    fn test_cas_unconditional_applies_against_live_version() {
        let store = MemoryStore::new();
        seed(&store, "a", 1);

        let outcome = store.compare_and_update(&EntityId::from("a"), None, &|_| Ok(99));
        match outcome {
            CasOutcome::Applied(entity) => {
                assert_eq!(entity.payload, 99);
                assert_eq!(entity.version, Version::INITIAL.next());
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[test]
    fn test_cas_rejection_writes_nothing() {
        let store = MemoryStore::new();
        seed(&store, "a", 1);

        let outcome = store.compare_and_update(&EntityId::from("a"), Some(Version::INITIAL), &|_| {
            Err(MutationError::validation("no"))
        });
        assert!(matches!(outcome, CasOutcome::Rejected(_)));

        let live = store.get(&EntityId::from("a")).unwrap();
        assert_eq!(live.payload, 1);
        assert_eq!(live.version, Version::INITIAL);
    }

    #[test]
    fn test_insert_and_update_is_all_or_nothing() {
        let store = MemoryStore::new();
        seed(&store, "old", 1);

        // Sibling rejection: neither the insert nor the sibling write lands.
        let result = store.insert_and_update(
            VersionedEntity::new(EntityId::from("new"), 2),
            &EntityId::from("old"),
            &|_| Err(MutationError::validation("retired already")),
        );
        assert!(result.is_err());
        assert!(store.get(&EntityId::from("new")).is_none());
        assert_eq!(store.get(&EntityId::from("old")).unwrap().version, Version::INITIAL);

        // Missing sibling: insert does not land either.
        let result = store.insert_and_update(
            VersionedEntity::new(EntityId::from("new"), 2),
            &EntityId::from("ghost"),
            &|v| Ok(*v),
        );
        assert!(matches!(result, Err(StoreError::SiblingMissing(_))));
        assert!(store.get(&EntityId::from("new")).is_none());
    }

    #[test]
    fn test_insert_and_update_applies_both() {
        let store = MemoryStore::new();
        seed(&store, "old", 1);

        let inserted = store
            .insert_and_update(
                VersionedEntity::new(EntityId::from("new"), 2),
                &EntityId::from("old"),
                &|v| Ok(v + 10),
            )
            .unwrap();
        assert_eq!(inserted.payload, 2);

        let old = store.get(&EntityId::from("old")).unwrap();
        assert_eq!(old.payload, 11);
        assert_eq!(old.version, Version::INITIAL.next());
    }
}
