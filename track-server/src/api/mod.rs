//! API route modules
//!
//! One module per resource, each pairing a small router with thin
//! handlers over the facade/manager/ledger. Handlers carry no business
//! logic.
//!
//! - [`orders`] - order CRUD, status transitions, transfers
//! - [`locations`] - location management (soft delete only)
//! - [`menu_items`] - menu item management
//! - [`users`] - user profile management
//! - [`fraud_claims`] - fraud claim management
//! - [`billing`] - usage report
//! - [`health`] - health check

pub mod billing;
pub mod fraud_claims;
pub mod health;
pub mod locations;
pub mod menu_items;
pub mod orders;
pub mod users;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(locations::router())
        .merge(menu_items::router())
        .merge(users::router())
        .merge(fraud_claims::router())
        .merge(billing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Business scoping for list endpoints. The id is supplied by the
/// authentication layer upstream and trusted as given.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeParams {
    pub business_id: Option<String>,
}
