//! Billing API Handlers

use axum::{
    Json,
    extract::{Query, State},
};

use super::super::ScopeParams;
use crate::billing::UsageReport;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/billing/usage?businessId=... - usage report for one business
pub async fn usage_report(
    State(state): State<ServerState>,
    Query(params): Query<ScopeParams>,
) -> AppResult<Json<UsageReport>> {
    let business_id = params
        .business_id
        .ok_or_else(|| AppError::Validation("businessId is required".into()))?;
    let report = state.ledger.usage_report(&business_id).await?;
    Ok(Json(report))
}
