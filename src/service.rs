//! Admin service composition root
//!
//! An explicitly constructed instance owning every entity table. Nothing
//! here is process-global: tests and embedders create as many isolated
//! instances as they need, and dropping the service releases all state.

use crate::batch::BatchMutationCoordinator;
use crate::directory::{BrandPayload, DirectoryService, StorePayload};
use crate::package::{PackagePayload, PackageService};
use crate::reservation::{ReservationService, ReservationSettings};
use crate::store::MemoryStore;

/// Owns the entity tables and hands out per-family services.
#[derive(Default)]
pub struct AdminService {
    brands: MemoryStore<BrandPayload>,
    stores: MemoryStore<StorePayload>,
    reservations: MemoryStore<ReservationSettings>,
    packages: MemoryStore<PackagePayload>,
}

impl AdminService {
    /// Creates a service with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store and brand registration and edits.
    pub fn directory(
        &self,
    ) -> DirectoryService<'_, MemoryStore<BrandPayload>, MemoryStore<StorePayload>, MemoryStore<ReservationSettings>>
    {
        DirectoryService::new(&self.brands, &self.stores, &self.reservations)
    }

    /// Single-store reservation settings operations.
    pub fn reservations(&self) -> ReservationService<'_, MemoryStore<ReservationSettings>> {
        ReservationService::new(&self.reservations)
    }

    /// Batch fan-out over reservation settings.
    pub fn reservation_batch(
        &self,
    ) -> BatchMutationCoordinator<'_, ReservationSettings, MemoryStore<ReservationSettings>> {
        BatchMutationCoordinator::new(&self.reservations)
    }

    /// Package operations.
    pub fn packages(&self) -> PackageService<'_, MemoryStore<PackagePayload>> {
        PackageService::new(&self.packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instances_are_isolated() {
        let a = AdminService::new();
        let b = AdminService::new();

        a.packages()
            .create(crate::package::NewPackage {
                name: "brunch".to_string(),
                description: String::new(),
                price_cents: 100,
            })
            .unwrap();

        // State created through one instance is invisible to the other.
        let created = a
            .packages()
            .create(crate::package::NewPackage {
                name: "dinner".to_string(),
                description: String::new(),
                price_cents: 200,
            })
            .unwrap();
        assert!(b.packages().get(&created.id).is_err());
    }
}
