//! Consumed collaborators
//!
//! Interfaces the core depends on but does not design: push notification
//! delivery and address verification. Defaults are in-process stand-ins;
//! deployments wire real implementations behind the same traits.

use async_trait::async_trait;

use shared::models::{Address, FraudClaim, GeoPoint, Order};
use validator::Validate;

/// Notification collaborator. Informed fire-and-forget of fraud-claim
/// creation and order-status changes; callers never wait on or retry
/// these.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn order_status_changed(&self, order: &Order);
    async fn fraud_claim_created(&self, claim: &FraudClaim);
}

/// Default notifier: structured log lines only.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn order_status_changed(&self, order: &Order) {
        tracing::info!(
            target: "notify",
            order_id = %order.id,
            order_number = %order.order_number,
            status = ?order.status,
            "Order status changed"
        );
    }

    async fn fraud_claim_created(&self, claim: &FraudClaim) {
        tracing::info!(
            target: "notify",
            claim_id = %claim.id,
            claim_number = %claim.claim_number,
            business_id = %claim.business_id,
            "Fraud claim created"
        );
    }
}

/// Result of checking a postal address.
#[derive(Debug, Clone)]
pub struct AddressCheck {
    pub is_valid: bool,
    pub coordinates: Option<GeoPoint>,
}

/// Address-verification collaborator. Used only to populate a location's
/// coordinates at creation time; geocoding itself happens elsewhere.
#[async_trait]
pub trait AddressVerifier: Send + Sync {
    async fn verify(&self, address: &Address) -> AddressCheck;
}

/// Default verifier: accepts any structurally complete address, supplies
/// no coordinates.
pub struct StructuralAddressVerifier;

#[async_trait]
impl AddressVerifier for StructuralAddressVerifier {
    async fn verify(&self, address: &Address) -> AddressCheck {
        AddressCheck {
            is_valid: address.validate().is_ok(),
            coordinates: None,
        }
    }
}
