//! Data models
//!
//! Shared between the track server and API clients. All records serialize
//! as camelCase with ISO-8601 timestamps; absent optional fields are
//! skipped on the wire (the durable store never persists them).

pub mod fraud_claim;
pub mod location;
pub mod menu_item;
pub mod order;
pub mod user;

// Re-exports
pub use fraud_claim::*;
pub use location::*;
pub use menu_item::*;
pub use order::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// GPS coordinates, decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Verification state shared by locations and order scan evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}
