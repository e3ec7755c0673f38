//! Reservation settings payload, validation, and service

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{
    ConcurrencyGuard, EntityId, MutationError, MutationResult, Version, VersionedEntity,
};
use crate::store::{EntityStore, StoreError};

/// Upper bound on the reservation window, in days.
pub const MAX_RESERVATION_DAYS: u16 = 365;

/// Reservation configuration for a single store.
///
/// The canonical disabled representation is `{ false, 0 }`, but stored
/// records with a nonzero day count while disabled are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSettings {
    pub is_reservation_enabled: bool,
    pub max_reservation_days: u16,
}

impl ReservationSettings {
    /// The settings a freshly provisioned store starts with.
    pub fn disabled() -> Self {
        Self {
            is_reservation_enabled: false,
            max_reservation_days: 0,
        }
    }
}

/// A requested settings change, as supplied by a caller.
///
/// Validation happens against this input before any entity is touched;
/// `materialize` produces the canonical stored form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSettingsUpdate {
    pub is_reservation_enabled: bool,
    pub max_reservation_days: u16,
}

impl ReservationSettingsUpdate {
    /// Checks the field-level invariant on the requested values.
    pub fn validate(&self) -> MutationResult<()> {
        if self.is_reservation_enabled {
            if self.max_reservation_days == 0 {
                return Err(MutationError::validation(
                    "reservations enabled with a zero-day window",
                ));
            }
            if self.max_reservation_days > MAX_RESERVATION_DAYS {
                return Err(MutationError::validation(format!(
                    "max_reservation_days {} exceeds limit {}",
                    self.max_reservation_days, MAX_RESERVATION_DAYS
                )));
            }
        }
        Ok(())
    }

    /// Produces the stored form. Disabling normalizes the day count to 0.
    pub fn materialize(&self) -> ReservationSettings {
        if self.is_reservation_enabled {
            ReservationSettings {
                is_reservation_enabled: true,
                max_reservation_days: self.max_reservation_days,
            }
        } else {
            ReservationSettings::disabled()
        }
    }
}

impl crate::batch::BatchUpdate<ReservationSettings> for ReservationSettingsUpdate {
    fn validate(&self) -> MutationResult<()> {
        ReservationSettingsUpdate::validate(self)
    }

    fn apply(&self, _current: &ReservationSettings) -> ReservationSettings {
        self.materialize()
    }
}

/// Reservation settings operations for a single store at a time.
pub struct ReservationService<'s, S: EntityStore<ReservationSettings>> {
    store: &'s S,
}

impl<'s, S: EntityStore<ReservationSettings>> ReservationService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Creates the settings record for a newly registered store.
    ///
    /// Reservations start disabled; the record shares the store's id.
    pub fn provision(&self, store_id: &EntityId) -> Result<VersionedEntity<ReservationSettings>, StoreError> {
        let entity = self.store.insert(VersionedEntity::new(
            store_id.clone(),
            ReservationSettings::disabled(),
        ))?;
        info!(store_id = %store_id, "reservation settings provisioned");
        Ok(entity)
    }

    /// Returns the settings for a store.
    pub fn get(&self, store_id: &EntityId) -> MutationResult<VersionedEntity<ReservationSettings>> {
        self.store
            .get(store_id)
            .ok_or_else(|| MutationError::not_found(store_id))
    }

    /// Replaces the settings for a store, guarded by the supplied version.
    pub fn update(
        &self,
        store_id: &EntityId,
        supplied: Version,
        update: &ReservationSettingsUpdate,
    ) -> MutationResult<VersionedEntity<ReservationSettings>> {
        update.validate()?;
        let next = update.materialize();

        let guard = ConcurrencyGuard::new(self.store);
        let result = guard
            .attempt(store_id, supplied, |_| next.clone())
            .into_result(store_id, supplied);
        if let Ok(entity) = &result {
            info!(
                store_id = %store_id,
                version = %entity.version,
                enabled = entity.payload.is_reservation_enabled,
                "reservation settings updated"
            );
        }
        result
    }
}
