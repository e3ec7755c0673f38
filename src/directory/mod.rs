//! Store and brand directory
//!
//! Plain versioned entities with no lifecycle of their own; every edit
//! goes through the concurrency guard with the same conflict contract as
//! the richer entities. Registering a store also provisions its
//! reservation settings record under the same id.

mod records;
mod service;

pub use records::{BrandPatch, BrandPayload, NewBrand, NewStore, StorePatch, StorePayload};
pub use service::DirectoryService;
