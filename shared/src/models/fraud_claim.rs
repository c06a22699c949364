//! Fraud Claim Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Fraud claim review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    #[default]
    Open,
    UnderReview,
    Resolved,
    Dismissed,
}

/// Evidence attached to a fraud claim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimEvidence {
    /// QR-scan proof captured at the location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_scan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photo_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_fingerprint: Option<String>,
}

/// Fraud claim entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudClaim {
    pub id: String,
    /// Human-readable claim number, generated at create time.
    pub claim_number: String,
    pub business_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub location_id: String,
    pub description: String,
    pub status: ClaimStatus,
    #[serde(default)]
    pub evidence: ClaimEvidence,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create fraud claim payload. The claim number is generated server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudClaimCreate {
    pub business_id: String,
    pub order_id: Option<String>,
    pub location_id: String,
    pub description: String,
    #[serde(default)]
    pub evidence: ClaimEvidence,
}

impl From<FraudClaimCreate> for FraudClaim {
    fn from(data: FraudClaimCreate) -> Self {
        FraudClaim {
            id: String::new(),
            claim_number: crate::util::claim_number(),
            business_id: data.business_id,
            order_id: data.order_id,
            location_id: data.location_id,
            description: data.description,
            status: ClaimStatus::Open,
            evidence: data.evidence,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: None,
        }
    }
}

/// Update fraud claim payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudClaimUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClaimStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<ClaimEvidence>,
}
