//! Package payload and operations

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{
    ConcurrencyGuard, EntityId, MutationError, MutationResult, Version, VersionedEntity,
};
use crate::store::EntityStore;

use super::status::{PackageStatus, TransitionAction};

/// Business payload of a package record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagePayload {
    pub name: String,
    pub description: String,
    pub price_cents: u32,
    pub status: PackageStatus,
    /// Groups successive versions of the same conceptual package.
    pub base_package_group_id: EntityId,
    /// At most one record per group carries `true`.
    pub is_latest: bool,
}

/// Input for creating a package. The record starts a fresh version group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPackage {
    pub name: String,
    pub description: String,
    pub price_cents: u32,
}

/// Field edits. `None` leaves a field unchanged; edits never touch the
/// lifecycle status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackagePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<u32>,
}

impl PackagePatch {
    fn apply(&self, current: &PackagePayload) -> PackagePayload {
        let mut next = current.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(price_cents) = self.price_cents {
            next.price_cents = price_cents;
        }
        next
    }
}

/// Package operations: creation, edits, lifecycle transitions, and
/// version-group management.
pub struct PackageService<'s, S: EntityStore<PackagePayload>> {
    store: &'s S,
}

impl<'s, S: EntityStore<PackagePayload>> PackageService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Creates a package in `DRAFT`, opening a new version group whose id
    /// is the first record's own id.
    pub fn create(&self, new: NewPackage) -> MutationResult<VersionedEntity<PackagePayload>> {
        let id = EntityId::generate();
        let payload = PackagePayload {
            name: new.name,
            description: new.description,
            price_cents: new.price_cents,
            status: PackageStatus::INITIAL,
            base_package_group_id: id.clone(),
            is_latest: true,
        };
        let entity = self
            .store
            .insert(VersionedEntity::new(id, payload))
            .map_err(MutationError::from)?;
        info!(id = %entity.id, "package created");
        Ok(entity)
    }

    /// Returns a package record.
    pub fn get(&self, id: &EntityId) -> MutationResult<VersionedEntity<PackagePayload>> {
        self.store.get(id).ok_or_else(|| MutationError::not_found(id))
    }

    /// Applies field edits, guarded by the supplied version. Status is
    /// untouched; the version still increments.
    pub fn edit(
        &self,
        id: &EntityId,
        supplied: Version,
        patch: &PackagePatch,
    ) -> MutationResult<VersionedEntity<PackagePayload>> {
        let guard = ConcurrencyGuard::new(self.store);
        guard
            .attempt(id, supplied, |current| patch.apply(current))
            .into_result(id, supplied)
    }

    /// Publishes a package. Allowed from `DRAFT` or `UNPUBLISHED`.
    pub fn publish(
        &self,
        id: &EntityId,
        supplied: Version,
    ) -> MutationResult<VersionedEntity<PackagePayload>> {
        self.transition(id, supplied, TransitionAction::Publish)
    }

    /// Unpublishes a package. Allowed only from `PUBLISHED`.
    pub fn unpublish(
        &self,
        id: &EntityId,
        supplied: Version,
    ) -> MutationResult<VersionedEntity<PackagePayload>> {
        self.transition(id, supplied, TransitionAction::Unpublish)
    }

    fn transition(
        &self,
        id: &EntityId,
        supplied: Version,
        action: TransitionAction,
    ) -> MutationResult<VersionedEntity<PackagePayload>> {
        let guard = ConcurrencyGuard::new(self.store);
        let result = guard
            .attempt_checked(id, supplied, |current| {
                let status = current.status.apply(action)?;
                Ok(PackagePayload {
                    status,
                    ..current.clone()
                })
            })
            .into_result(id, supplied);
        if let Ok(entity) = &result {
            info!(id = %id, status = %entity.payload.status, "package transitioned");
        }
        result
    }

    /// Produces a new record for an existing package's group.
    ///
    /// The new record gets a fresh id, the initial version, `DRAFT`
    /// status, and `is_latest = true`. The source record must be its
    /// group's current latest and is retired in the same atomic region.
    pub fn create_new_version(
        &self,
        id: &EntityId,
    ) -> MutationResult<VersionedEntity<PackagePayload>> {
        let source = self.get(id)?;
        if !source.payload.is_latest {
            return Err(MutationError::validation(format!(
                "{id} is not the latest version of its group"
            )));
        }

        let new_payload = PackagePayload {
            status: PackageStatus::INITIAL,
            is_latest: true,
            ..source.payload.clone()
        };
        let new_entity = VersionedEntity::new(EntityId::generate(), new_payload);

        // The retire check re-runs inside the store's atomic region, so a
        // concurrent create_new_version on the same source cannot leave
        // two latest records in the group.
        let inserted = self
            .store
            .insert_and_update(new_entity, id, &|prev: &PackagePayload| {
                if !prev.is_latest {
                    return Err(MutationError::validation(
                        "source record is no longer the latest of its group",
                    ));
                }
                Ok(PackagePayload {
                    is_latest: false,
                    ..prev.clone()
                })
            })
            .map_err(MutationError::from)?;

        info!(
            group = %inserted.payload.base_package_group_id,
            new_id = %inserted.id,
            retired = %id,
            "new package version created"
        );
        Ok(inserted)
    }
}
