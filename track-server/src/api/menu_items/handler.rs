//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use super::super::ScopeParams;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/menu-items - list menu items
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ScopeParams>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.store.get_all(params.business_id.as_deref()).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/:id - fetch one menu item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let item = state.store.get(&id).await?;
    Ok(Json(item))
}

/// POST /api/menu-items - create a menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.store.create(MenuItem::from(payload)).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/:id - partial field update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.store.update::<MenuItem>(&id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id - remove a menu item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let removed = state.store.delete::<MenuItem>(&id).await?;
    Ok(Json(removed))
}
