//! User API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::models::{User, UserCreate, UserUpdate};

use super::super::ScopeParams;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/users - list users
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ScopeParams>,
) -> AppResult<Json<Vec<User>>> {
    let users = state.store.get_all(params.business_id.as_deref()).await?;
    Ok(Json(users))
}

/// GET /api/users/:id - fetch one user
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state.store.get(&id).await?;
    Ok(Json(user))
}

/// POST /api/users - create a user
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    let user = state.store.create(User::from(payload)).await?;
    Ok(Json(user))
}

/// PUT /api/users/:id - partial field update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    let user = state.store.update::<User>(&id, payload).await?;
    Ok(Json(user))
}

/// DELETE /api/users/:id - remove a user
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let removed = state.store.delete::<User>(&id).await?;
    Ok(Json(removed))
}
