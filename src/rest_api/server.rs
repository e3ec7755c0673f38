//! # Admin HTTP Server
//!
//! Axum-based HTTP server for the admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::batch::BatchOutcome;
use crate::core::{EntityId, VersionedEntity};
use crate::directory::{BrandPatch, BrandPayload, NewBrand, NewStore, StorePatch, StorePayload};
use crate::package::{NewPackage, PackagePatch, PackagePayload};
use crate::reservation::ReservationSettings;
use crate::service::AdminService;

use super::errors::RestError;
use super::request::{
    BatchSettingsRequest, MutationRequest, TransitionRequest, UpdateSettingsRequest,
};
use super::response::{HealthResponse, SingleResponse};

/// Admin API server state
pub struct AdminServer {
    service: Arc<AdminService>,
}

impl AdminServer {
    pub fn new(service: AdminService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        Router::new()
            .route("/healthz", get(health_handler))
            .route("/admin/v1/brands", post(create_brand_handler))
            .route("/admin/v1/brands/{id}", get(get_brand_handler))
            .route("/admin/v1/brands/{id}", patch(patch_brand_handler))
            .route("/admin/v1/stores", post(create_store_handler))
            .route("/admin/v1/stores/{id}", get(get_store_handler))
            .route("/admin/v1/stores/{id}", patch(patch_store_handler))
            .route(
                "/admin/v1/stores/{id}/reservation-settings",
                get(get_settings_handler),
            )
            .route(
                "/admin/v1/stores/{id}/reservation-settings",
                patch(patch_settings_handler),
            )
            .route(
                "/admin/v1/reservation-settings/batch",
                post(batch_settings_handler),
            )
            .route("/admin/v1/packages", post(create_package_handler))
            .route("/admin/v1/packages/{id}", get(get_package_handler))
            .route("/admin/v1/packages/{id}", patch(patch_package_handler))
            .route(
                "/admin/v1/packages/{id}/publish",
                post(publish_package_handler),
            )
            .route(
                "/admin/v1/packages/{id}/unpublish",
                post(unpublish_package_handler),
            )
            .route(
                "/admin/v1/packages/{id}/versions",
                post(create_package_version_handler),
            )
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.service)
    }
}

/// Shared state type
type ServerState = Arc<AdminService>;

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ==================
// Brands
// ==================

async fn create_brand_handler(
    State(service): State<ServerState>,
    Json(body): Json<NewBrand>,
) -> Result<(StatusCode, Json<SingleResponse<VersionedEntity<BrandPayload>>>), RestError> {
    let entity = service.directory().create_brand(body)?;
    Ok((StatusCode::CREATED, Json(SingleResponse::new(entity))))
}

async fn get_brand_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SingleResponse<VersionedEntity<BrandPayload>>>, RestError> {
    let entity = service.directory().get_brand(&EntityId::from(id))?;
    Ok(Json(SingleResponse::new(entity)))
}

async fn patch_brand_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<MutationRequest<BrandPatch>>,
) -> Result<Json<SingleResponse<VersionedEntity<BrandPayload>>>, RestError> {
    let entity =
        service
            .directory()
            .edit_brand(&EntityId::from(id), body.expected_version, &body.patch)?;
    Ok(Json(SingleResponse::new(entity)))
}

// ==================
// Stores
// ==================

async fn create_store_handler(
    State(service): State<ServerState>,
    Json(body): Json<NewStore>,
) -> Result<(StatusCode, Json<SingleResponse<VersionedEntity<StorePayload>>>), RestError> {
    let entity = service.directory().create_store(body)?;
    Ok((StatusCode::CREATED, Json(SingleResponse::new(entity))))
}

async fn get_store_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SingleResponse<VersionedEntity<StorePayload>>>, RestError> {
    let entity = service.directory().get_store(&EntityId::from(id))?;
    Ok(Json(SingleResponse::new(entity)))
}

async fn patch_store_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<MutationRequest<StorePatch>>,
) -> Result<Json<SingleResponse<VersionedEntity<StorePayload>>>, RestError> {
    let entity =
        service
            .directory()
            .edit_store(&EntityId::from(id), body.expected_version, &body.patch)?;
    Ok(Json(SingleResponse::new(entity)))
}

// ==================
// Reservation settings
// ==================

async fn get_settings_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SingleResponse<VersionedEntity<ReservationSettings>>>, RestError> {
    let entity = service.reservations().get(&EntityId::from(id))?;
    Ok(Json(SingleResponse::new(entity)))
}

async fn patch_settings_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<Json<SingleResponse<VersionedEntity<ReservationSettings>>>, RestError> {
    let entity =
        service
            .reservations()
            .update(&EntityId::from(id), body.expected_version, &body.settings)?;
    Ok(Json(SingleResponse::new(entity)))
}

async fn batch_settings_handler(
    State(service): State<ServerState>,
    Json(body): Json<BatchSettingsRequest>,
) -> Result<Json<BatchOutcome>, RestError> {
    let outcome = service
        .reservation_batch()
        .apply_batch(&body.ids, &body.settings)?;
    Ok(Json(outcome))
}

// ==================
// Packages
// ==================

async fn create_package_handler(
    State(service): State<ServerState>,
    Json(body): Json<NewPackage>,
) -> Result<(StatusCode, Json<SingleResponse<VersionedEntity<PackagePayload>>>), RestError> {
    let entity = service.packages().create(body)?;
    Ok((StatusCode::CREATED, Json(SingleResponse::new(entity))))
}

async fn get_package_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SingleResponse<VersionedEntity<PackagePayload>>>, RestError> {
    let entity = service.packages().get(&EntityId::from(id))?;
    Ok(Json(SingleResponse::new(entity)))
}

async fn patch_package_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<MutationRequest<PackagePatch>>,
) -> Result<Json<SingleResponse<VersionedEntity<PackagePayload>>>, RestError> {
    let entity =
        service
            .packages()
            .edit(&EntityId::from(id), body.expected_version, &body.patch)?;
    Ok(Json(SingleResponse::new(entity)))
}

async fn publish_package_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<TransitionRequest>,
) -> Result<Json<SingleResponse<VersionedEntity<PackagePayload>>>, RestError> {
    let entity = service
        .packages()
        .publish(&EntityId::from(id), body.expected_version)?;
    Ok(Json(SingleResponse::new(entity)))
}

async fn unpublish_package_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<TransitionRequest>,
) -> Result<Json<SingleResponse<VersionedEntity<PackagePayload>>>, RestError> {
    let entity = service
        .packages()
        .unpublish(&EntityId::from(id), body.expected_version)?;
    Ok(Json(SingleResponse::new(entity)))
}

async fn create_package_version_handler(
    State(service): State<ServerState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SingleResponse<VersionedEntity<PackagePayload>>>), RestError> {
    let entity = service.packages().create_new_version(&EntityId::from(id))?;
    Ok((StatusCode::CREATED, Json(SingleResponse::new(entity))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = AdminServer::new(AdminService::new());
        let _router = server.router();
        // Router builds successfully
    }
}
