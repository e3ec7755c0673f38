//! Directory operations

use tracing::info;

use crate::core::{
    ConcurrencyGuard, EntityId, MutationError, MutationResult, Version, VersionedEntity,
};
use crate::reservation::{ReservationService, ReservationSettings};
use crate::store::EntityStore;

use super::records::{BrandPatch, BrandPayload, NewBrand, NewStore, StorePatch, StorePayload};

/// Brand and store registration and edits.
pub struct DirectoryService<'s, SB, SS, SR>
where
    SB: EntityStore<BrandPayload>,
    SS: EntityStore<StorePayload>,
    SR: EntityStore<ReservationSettings>,
{
    brands: &'s SB,
    stores: &'s SS,
    reservations: &'s SR,
}

impl<'s, SB, SS, SR> DirectoryService<'s, SB, SS, SR>
where
    SB: EntityStore<BrandPayload>,
    SS: EntityStore<StorePayload>,
    SR: EntityStore<ReservationSettings>,
{
    pub fn new(brands: &'s SB, stores: &'s SS, reservations: &'s SR) -> Self {
        Self {
            brands,
            stores,
            reservations,
        }
    }

    pub fn create_brand(&self, new: NewBrand) -> MutationResult<VersionedEntity<BrandPayload>> {
        let entity = self
            .brands
            .insert(VersionedEntity::new(
                EntityId::generate(),
                BrandPayload { name: new.name },
            ))
            .map_err(MutationError::from)?;
        info!(id = %entity.id, "brand registered");
        Ok(entity)
    }

    pub fn get_brand(&self, id: &EntityId) -> MutationResult<VersionedEntity<BrandPayload>> {
        self.brands.get(id).ok_or_else(|| MutationError::not_found(id))
    }

    pub fn edit_brand(
        &self,
        id: &EntityId,
        supplied: Version,
        patch: &BrandPatch,
    ) -> MutationResult<VersionedEntity<BrandPayload>> {
        let guard = ConcurrencyGuard::new(self.brands);
        guard
            .attempt(id, supplied, |current| patch.apply(current))
            .into_result(id, supplied)
    }

    /// Registers a store under an existing brand and provisions its
    /// reservation settings record (disabled) under the same id.
    pub fn create_store(&self, new: NewStore) -> MutationResult<VersionedEntity<StorePayload>> {
        if self.brands.get(&new.brand_id).is_none() {
            return Err(MutationError::validation(format!(
                "unknown brand: {}",
                new.brand_id
            )));
        }

        let entity = self
            .stores
            .insert(VersionedEntity::new(
                EntityId::generate(),
                StorePayload {
                    name: new.name,
                    brand_id: new.brand_id,
                    timezone: new.timezone,
                },
            ))
            .map_err(MutationError::from)?;

        ReservationService::new(self.reservations)
            .provision(&entity.id)
            .map_err(MutationError::from)?;

        info!(id = %entity.id, brand = %entity.payload.brand_id, "store registered");
        Ok(entity)
    }

    pub fn get_store(&self, id: &EntityId) -> MutationResult<VersionedEntity<StorePayload>> {
        self.stores.get(id).ok_or_else(|| MutationError::not_found(id))
    }

    pub fn edit_store(
        &self,
        id: &EntityId,
        supplied: Version,
        patch: &StorePatch,
    ) -> MutationResult<VersionedEntity<StorePayload>> {
        if let Some(brand_id) = &patch.brand_id {
            if self.brands.get(brand_id).is_none() {
                return Err(MutationError::validation(format!(
                    "unknown brand: {brand_id}"
                )));
            }
        }
        let guard = ConcurrencyGuard::new(self.stores);
        guard
            .attempt(id, supplied, |current| patch.apply(current))
            .into_result(id, supplied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    struct Fixture {
        brands: MemoryStore<BrandPayload>,
        stores: MemoryStore<StorePayload>,
        reservations: MemoryStore<ReservationSettings>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                brands: MemoryStore::new(),
                stores: MemoryStore::new(),
                reservations: MemoryStore::new(),
            }
        }

        fn service(&self) -> DirectoryService<'_, MemoryStore<BrandPayload>, MemoryStore<StorePayload>, MemoryStore<ReservationSettings>>
        {
            DirectoryService::new(&self.brands, &self.stores, &self.reservations)
        }
    }

    fn new_store(brand_id: &EntityId) -> NewStore {
        NewStore {
            name: "Midtown".to_string(),
            brand_id: brand_id.clone(),
            timezone: "America/New_York".to_string(),
        }
    }

    #[test]
    fn test_create_store_provisions_reservation_settings() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let brand = service
            .create_brand(NewBrand {
                name: "Acme Dining".to_string(),
            })
            .unwrap();

        let store = service.create_store(new_store(&brand.id)).unwrap();

        let settings = fixture.reservations.get(&store.id).unwrap();
        assert!(!settings.payload.is_reservation_enabled);
        assert_eq!(settings.payload.max_reservation_days, 0);
    }

    #[test]
    fn test_create_store_under_unknown_brand_rejected() {
        let fixture = Fixture::new();
        let service = fixture.service();

        let err = service
            .create_store(new_store(&EntityId::from("ghost-brand")))
            .unwrap_err();
        assert!(matches!(err, MutationError::Validation(_)));
        assert!(fixture.stores.is_empty());
        assert!(fixture.reservations.is_empty());
    }

    #[test]
    fn test_edit_store_with_stale_version_conflicts() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let brand = service
            .create_brand(NewBrand {
                name: "Acme Dining".to_string(),
            })
            .unwrap();
        let store = service.create_store(new_store(&brand.id)).unwrap();

        service
            .edit_store(
                &store.id,
                store.version,
                &StorePatch {
                    name: Some("Midtown East".to_string()),
                    ..StorePatch::default()
                },
            )
            .unwrap();

        let err = service
            .edit_store(
                &store.id,
                store.version,
                &StorePatch {
                    name: Some("Midtown West".to_string()),
                    ..StorePatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, MutationError::VersionConflict { .. }));
        assert_eq!(
            service.get_store(&store.id).unwrap().payload.name,
            "Midtown East"
        );
    }

    #[test]
    fn test_edit_brand_applies_patch() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let brand = service
            .create_brand(NewBrand {
                name: "Acme".to_string(),
            })
            .unwrap();

        let edited = service
            .edit_brand(
                &brand.id,
                brand.version,
                &BrandPatch {
                    name: Some("Acme Dining".to_string()),
                },
            )
            .unwrap();
        assert_eq!(edited.payload.name, "Acme Dining");
        assert_eq!(edited.version, Version::new(2));
    }
}
