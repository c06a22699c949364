//! Fraud Claim API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::models::{FraudClaim, FraudClaimCreate, FraudClaimUpdate};

use super::super::ScopeParams;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/fraud-claims - list fraud claims
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ScopeParams>,
) -> AppResult<Json<Vec<FraudClaim>>> {
    let claims = state.store.get_all(params.business_id.as_deref()).await?;
    Ok(Json(claims))
}

/// GET /api/fraud-claims/:id - fetch one fraud claim
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<FraudClaim>> {
    let claim = state.store.get(&id).await?;
    Ok(Json(claim))
}

/// POST /api/fraud-claims - file a fraud claim
///
/// The claim number is generated server-side; the notification
/// collaborator is informed fire-and-forget.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FraudClaimCreate>,
) -> AppResult<Json<FraudClaim>> {
    let claim = state.store.create(FraudClaim::from(payload)).await?;

    let notifier = state.notifier.clone();
    let created = claim.clone();
    tokio::spawn(async move {
        notifier.fraud_claim_created(&created).await;
    });

    Ok(Json(claim))
}

/// PUT /api/fraud-claims/:id - partial field update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FraudClaimUpdate>,
) -> AppResult<Json<FraudClaim>> {
    let claim = state.store.update::<FraudClaim>(&id, payload).await?;
    Ok(Json(claim))
}

/// DELETE /api/fraud-claims/:id - remove a fraud claim
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let removed = state.store.delete::<FraudClaim>(&id).await?;
    Ok(Json(removed))
}
