//! Location Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{GeoPoint, VerificationStatus};

/// Postal address of a location.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[validate(length(min = 1, message = "street is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "postal code is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
}

/// Business contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Verification state of a location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationVerification {
    pub status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

/// Billing state of a location.
///
/// `monthly_usage` is the net count of orders currently attributed to this
/// location: incremented on creation/transfer-in, decremented on
/// transfer-out. No floor is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingInfo {
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deactivated_at: Option<DateTime<Utc>>,
    pub monthly_usage: i64,
}

impl Default for BillingInfo {
    fn default() -> Self {
        Self {
            is_active: true,
            activated_at: None,
            deactivated_at: None,
            monthly_usage: 0,
        }
    }
}

/// Operational settings of a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSettings {
    pub is_active: bool,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_orders_per_day: Option<u32>,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            is_active: true,
            timezone: "UTC".to_string(),
            operating_hours: None,
            max_orders_per_day: None,
        }
    }
}

/// Location entity: a billable physical site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    /// Owning business.
    pub business_id: String,
    pub name: String,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(default)]
    pub verification: LocationVerification,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qr_code_ids: Vec<String>,
    #[serde(default)]
    pub billing: BillingInfo,
    #[serde(default)]
    pub settings: LocationSettings,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create location payload. Address fields are structurally validated
/// before the record is accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationCreate {
    #[validate(length(min = 1, message = "business id is required"))]
    pub business_id: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(nested)]
    pub address: Address,
    pub contact: Option<ContactInfo>,
    #[serde(default)]
    pub qr_code_ids: Vec<String>,
    pub settings: Option<LocationSettings>,
}

impl From<LocationCreate> for Location {
    fn from(data: LocationCreate) -> Self {
        Location {
            id: String::new(),
            business_id: data.business_id,
            name: data.name,
            address: data.address,
            coordinates: None,
            contact: data.contact,
            verification: LocationVerification::default(),
            qr_code_ids: data.qr_code_ids,
            billing: BillingInfo::default(),
            settings: data.settings.unwrap_or_default(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: None,
        }
    }
}

/// Update location payload. Partial field merge; sub-records are replaced
/// as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<LocationVerification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<BillingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<LocationSettings>,
}
