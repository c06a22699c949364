//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GeoPoint, VerificationStatus};

/// Order status. Transitions only move forward:
/// `pending -> picked_up -> delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    PickedUp,
    Delivered,
}

impl OrderStatus {
    /// Position in the lifecycle, used for the forward-only check.
    pub fn rank(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::PickedUp => 1,
            OrderStatus::Delivered => 2,
        }
    }
}

/// How a delivery was confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryConfirmation {
    #[serde(rename = "manual")]
    Manual,
    /// Inferred by the overdue scan, not confirmed by anyone.
    #[serde(rename = "auto-timeout")]
    AutoTimeout,
}

/// Location attribution of an order, including fraud evidence captured at
/// scan time and transfer history. Rewritten as a whole on transfer;
/// `business_id` never changes through a plain field update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLocation {
    pub location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// Billing owner of the order.
    pub business_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_id: Option<String>,
    pub verification_status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transferred_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_reason: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Human-readable number shown to the customer, e.g. "ORD-1042".
    pub order_number: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Free-text order contents.
    pub order_details: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picked_up_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_confirmation_method: Option<DeliveryConfirmation>,
    pub location: OrderLocation,
}

/// Create order payload: everything except the generated id/createdAt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub order_details: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub driver_name: Option<String>,
    pub driver_company: Option<String>,
    pub location: OrderLocation,
}

impl From<OrderCreate> for Order {
    fn from(data: OrderCreate) -> Self {
        Order {
            id: String::new(),
            order_number: data.order_number,
            customer_name: data.customer_name,
            customer_email: data.customer_email,
            order_details: data.order_details,
            status: data.status,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: None,
            picked_up_at: None,
            delivered_at: None,
            driver_name: data.driver_name,
            driver_company: data.driver_company,
            delivery_confirmation_method: None,
            location: data.location,
        }
    }
}

/// Update order payload. Partial field merge: fields left `None` keep
/// their stored value; `location` is replaced as a whole sub-record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picked_up_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_confirmation_method: Option<DeliveryConfirmation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<OrderLocation>,
}
