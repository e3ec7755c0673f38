//! Directory record payloads and patches

use serde::{Deserialize, Serialize};

use crate::core::EntityId;

/// A brand operating one or more stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandPayload {
    pub name: String,
}

/// Input for registering a brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBrand {
    pub name: String,
}

/// Brand field edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandPatch {
    pub name: Option<String>,
}

impl BrandPatch {
    pub(super) fn apply(&self, current: &BrandPayload) -> BrandPayload {
        BrandPayload {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
        }
    }
}

/// A physical store belonging to a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePayload {
    pub name: String,
    pub brand_id: EntityId,
    pub timezone: String,
}

/// Input for registering a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStore {
    pub name: String,
    pub brand_id: EntityId,
    pub timezone: String,
}

/// Store field edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorePatch {
    pub name: Option<String>,
    pub brand_id: Option<EntityId>,
    pub timezone: Option<String>,
}

impl StorePatch {
    pub(super) fn apply(&self, current: &StorePayload) -> StorePayload {
        StorePayload {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            brand_id: self
                .brand_id
                .clone()
                .unwrap_or_else(|| current.brand_id.clone()),
            timezone: self
                .timezone
                .clone()
                .unwrap_or_else(|| current.timezone.clone()),
        }
    }
}
