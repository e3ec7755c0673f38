//! Sellable package entity
//!
//! Packages bundle sellable items for a store. On top of the generic
//! mutation core they add two things:
//!
//! - a lifecycle state machine (`DRAFT → PUBLISHED ⇄ UNPUBLISHED`), where
//!   invalid transitions are reported, never silently coerced
//! - version groups: successive records of "the same" conceptual package
//!   share a `base_package_group_id`, and at most one record per group is
//!   the latest at any time

mod service;
mod status;

pub use service::{NewPackage, PackagePatch, PackagePayload, PackageService};
pub use status::{PackageStatus, TransitionAction};
