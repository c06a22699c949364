//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::store::BackendMode;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub backend: &'static str,
    pub version: &'static str,
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

async fn health(State(state): State<ServerState>) -> Json<HealthStatus> {
    let backend = match state.store.mode() {
        BackendMode::Remote => "remote",
        BackendMode::Memory => "memory",
    };
    Json(HealthStatus {
        status: "ok",
        backend,
        version: env!("CARGO_PKG_VERSION"),
    })
}
