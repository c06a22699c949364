//! Location Usage Ledger
//!
//! Keeps `billing.monthlyUsage` equal to the net count of orders
//! attributed to each location: +1 on creation and transfer-in, -1 on
//! transfer-out. Whether the counter should reset at a billing-period
//! boundary is an open question upstream; it does not reset here.

use std::sync::Arc;

use serde::Serialize;

use shared::models::{Location, LocationUpdate};

use crate::store::{DataStore, StoreResult};

#[derive(Clone)]
pub struct UsageLedger {
    store: Arc<DataStore>,
}

/// One location's row in the usage report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUsage {
    pub location_id: String,
    pub name: String,
    pub monthly_usage: i64,
    pub billing_active: bool,
}

/// Per-business usage aggregation for billing display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub business_id: String,
    pub total_orders: i64,
    pub locations: Vec<LocationUsage>,
}

impl UsageLedger {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// Add `delta` to a location's monthly usage and write it back. No
    /// clamp: under a half-finished transfer a decrement can land without
    /// its matching increment, and the counter shows it.
    pub async fn adjust_usage(&self, location_id: &str, delta: i64) -> StoreResult<Location> {
        let location: Location = self.store.get(location_id).await?;
        let mut billing = location.billing;
        billing.monthly_usage += delta;

        let patch = LocationUpdate {
            billing: Some(billing),
            ..Default::default()
        };
        let updated = self.store.update::<Location>(location_id, patch).await?;
        tracing::debug!(
            location_id = %location_id,
            delta,
            monthly_usage = updated.billing.monthly_usage,
            "Adjusted location usage"
        );
        Ok(updated)
    }

    /// Aggregate monthly usage across every location owned by a business.
    pub async fn usage_report(&self, business_id: &str) -> StoreResult<UsageReport> {
        let locations: Vec<Location> = self.store.get_all(Some(business_id)).await?;
        let rows: Vec<LocationUsage> = locations
            .into_iter()
            .map(|location| LocationUsage {
                location_id: location.id,
                name: location.name,
                monthly_usage: location.billing.monthly_usage,
                billing_active: location.billing.is_active,
            })
            .collect();
        let total_orders = rows.iter().map(|row| row.monthly_usage).sum();

        Ok(UsageReport {
            business_id: business_id.to_string(),
            total_orders,
            locations: rows,
        })
    }
}
