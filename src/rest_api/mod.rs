//! # Admin REST API Module
//!
//! HTTP surface over the mutation core. Handlers are thin adapters: they
//! decode the request shape, call the owning service, and map mutation
//! outcomes onto status codes. A version conflict is reported as its own
//! status (409) with the live record in the body, so clients can present
//! "this record changed since you loaded it" and reconcile without a
//! second round trip.

pub mod errors;
pub mod request;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use request::{BatchSettingsRequest, MutationRequest, TransitionRequest, UpdateSettingsRequest};
pub use response::{HealthResponse, SingleResponse};
pub use server::AdminServer;
