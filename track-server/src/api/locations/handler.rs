//! Location API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use shared::models::{BillingInfo, Location, LocationCreate, LocationUpdate};

use super::super::ScopeParams;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/locations - list locations, optionally scoped to one business
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ScopeParams>,
) -> AppResult<Json<Vec<Location>>> {
    let locations = state.store.get_all(params.business_id.as_deref()).await?;
    Ok(Json(locations))
}

/// GET /api/locations/:id - fetch one location
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Location>> {
    let location = state.store.get(&id).await?;
    Ok(Json(location))
}

/// POST /api/locations - create a location
///
/// The address is structurally validated, then handed to the verification
/// collaborator; its coordinates (if any) are stored with the record.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LocationCreate>,
) -> AppResult<Json<Location>> {
    payload.validate()?;

    let check = state.address_verifier.verify(&payload.address).await;
    if !check.is_valid {
        return Err(AppError::Validation("address could not be verified".into()));
    }

    let mut location = Location::from(payload);
    location.coordinates = check.coordinates;

    let location = state.store.create(location).await?;
    Ok(Json(location))
}

/// PUT /api/locations/:id - partial field update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<LocationUpdate>,
) -> AppResult<Json<Location>> {
    let location = state.store.update::<Location>(&id, payload).await?;
    Ok(Json(location))
}

/// DELETE /api/locations/:id - soft delete
///
/// Locations are never physically removed: the record is marked inactive
/// for both operations and billing, and stays queryable.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Location>> {
    let location: Location = state.store.get(&id).await?;

    let mut settings = location.settings;
    settings.is_active = false;
    let billing = BillingInfo {
        is_active: false,
        deactivated_at: Some(shared::util::now()),
        ..location.billing
    };

    let patch = LocationUpdate {
        settings: Some(settings),
        billing: Some(billing),
        ..Default::default()
    };
    let location = state.store.update::<Location>(&id, patch).await?;
    Ok(Json(location))
}
