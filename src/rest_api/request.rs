//! # Request Shapes
//!
//! Wire shapes for mutation requests. Single-entity mutations carry the
//! version the caller last observed; batch requests carry no per-id
//! versions because batch intent is "set to this value regardless of
//! prior value."

use serde::Deserialize;

use crate::core::{EntityId, Version};
use crate::reservation::ReservationSettingsUpdate;

/// Single-entity mutation: `{ expected_version, patch }`
#[derive(Debug, Deserialize)]
pub struct MutationRequest<T> {
    pub expected_version: Version,
    pub patch: T,
}

/// Lifecycle transition: `{ expected_version }`
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub expected_version: Version,
}

/// Reservation settings replacement for one store
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub expected_version: Version,
    pub settings: ReservationSettingsUpdate,
}

/// Batch mutation: `{ ids, settings }`
#[derive(Debug, Deserialize)]
pub struct BatchSettingsRequest {
    pub ids: Vec<EntityId>,
    pub settings: ReservationSettingsUpdate,
}
