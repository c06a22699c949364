//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Order, OrderCreate, OrderStatus, OrderUpdate};

use super::super::ScopeParams;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/orders - list orders, optionally scoped to one business
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ScopeParams>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.store.get_all(params.business_id.as_deref()).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - fetch one order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.store.get(&id).await?;
    Ok(Json(order))
}

/// POST /api/orders - create an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = state.lifecycle.create_order(payload).await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id - partial field update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.store.update::<Order>(&id, payload).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: OrderStatus,
}

/// POST /api/orders/:id/status - advance the order state machine
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<Order>> {
    let order = state.lifecycle.update_status(&id, payload.status).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    pub location_id: String,
    pub reason: Option<String>,
}

/// POST /api/orders/:id/transfer - move the order to another location
pub async fn transfer(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransferPayload>,
) -> AppResult<Json<Order>> {
    let order = state
        .lifecycle
        .transfer(&id, &payload.location_id, payload.reason)
        .await?;
    Ok(Json(order))
}
