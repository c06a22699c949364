//! Order lifecycle integration tests
//!
//! Exercise the lifecycle manager and usage ledger over an in-memory
//! facade: state machine rules, set-once timestamps, transfers, and the
//! overdue auto-complete scan.

use std::sync::Arc;

use chrono::Duration;

use shared::models::{
    Address, DeliveryConfirmation, Location, LocationCreate, Order, OrderCreate, OrderLocation,
    OrderStatus, OrderUpdate, VerificationStatus,
};
use track_server::services::LogNotifier;
use track_server::{DataStore, LifecycleError, OrderLifecycle, UsageLedger};

const COMPLETE_AFTER_MINS: i64 = 30;

struct Harness {
    store: Arc<DataStore>,
    ledger: UsageLedger,
    lifecycle: OrderLifecycle,
}

fn harness() -> Harness {
    let store = Arc::new(DataStore::in_memory());
    let ledger = UsageLedger::new(store.clone());
    let lifecycle = OrderLifecycle::new(
        store.clone(),
        ledger.clone(),
        Arc::new(LogNotifier),
        Duration::minutes(COMPLETE_AFTER_MINS),
    );
    Harness {
        store,
        ledger,
        lifecycle,
    }
}

async fn create_location(harness: &Harness, business_id: &str, name: &str) -> Location {
    harness
        .store
        .create(Location::from(LocationCreate {
            business_id: business_id.to_string(),
            name: name.to_string(),
            address: Address {
                street: "1 Harbour Rd".into(),
                city: "Dockside".into(),
                state: None,
                postal_code: "9001".into(),
                country: "AU".into(),
            },
            contact: None,
            qr_code_ids: vec![],
            settings: None,
        }))
        .await
        .unwrap()
}

fn order_draft(location: &Location) -> OrderCreate {
    OrderCreate {
        order_number: "ORD-1".into(),
        customer_name: "Sam Diner".into(),
        customer_email: None,
        order_details: "2x laksa, 1x iced tea".into(),
        status: OrderStatus::Pending,
        driver_name: None,
        driver_company: None,
        location: OrderLocation {
            location_id: location.id.clone(),
            location_name: Some(location.name.clone()),
            business_id: location.business_id.clone(),
            qr_code_id: None,
            verification_status: VerificationStatus::Verified,
            coordinates: None,
            ip_address: None,
            device_fingerprint: None,
            previous_location_id: None,
            transferred_at: None,
            transfer_reason: None,
        },
    }
}

/// Push an order's pickup timestamp into the past, as if the clock had
/// advanced since the driver scanned it.
async fn backdate_pickup(harness: &Harness, order_id: &str, minutes: i64) {
    let patch = OrderUpdate {
        picked_up_at: Some(shared::util::now() - Duration::minutes(minutes)),
        ..Default::default()
    };
    harness
        .store
        .update::<Order>(order_id, patch)
        .await
        .unwrap();
}

#[tokio::test]
async fn create_order_attributes_usage_to_its_location() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;

    let order = h.lifecycle.create_order(order_draft(&location)).await.unwrap();
    assert!(!order.id.is_empty());
    assert_eq!(order.status, OrderStatus::Pending);

    let stored: Location = h.store.get(&location.id).await.unwrap();
    assert_eq!(stored.billing.monthly_usage, 1);
}

#[tokio::test]
async fn status_moves_forward_and_timestamps_set_once() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;
    let order = h.lifecycle.create_order(order_draft(&location)).await.unwrap();

    let picked = h
        .lifecycle
        .update_status(&order.id, OrderStatus::PickedUp)
        .await
        .unwrap();
    assert_eq!(picked.status, OrderStatus::PickedUp);
    let first_pickup = picked.picked_up_at.expect("pickedUpAt set on pickup");

    // Repeating the same status must not overwrite the timestamp
    let repeated = h
        .lifecycle
        .update_status(&order.id, OrderStatus::PickedUp)
        .await
        .unwrap();
    assert_eq!(repeated.picked_up_at, Some(first_pickup));

    let delivered = h
        .lifecycle
        .update_status(&order.id, OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert!(delivered.delivered_at.is_some());
    assert_eq!(
        delivered.delivery_confirmation_method,
        Some(DeliveryConfirmation::Manual)
    );
    assert_eq!(delivered.picked_up_at, Some(first_pickup));
}

#[tokio::test]
async fn backward_transitions_are_rejected() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;
    let order = h.lifecycle.create_order(order_draft(&location)).await.unwrap();

    h.lifecycle
        .update_status(&order.id, OrderStatus::PickedUp)
        .await
        .unwrap();
    h.lifecycle
        .update_status(&order.id, OrderStatus::Delivered)
        .await
        .unwrap();

    let result = h
        .lifecycle
        .update_status(&order.id, OrderStatus::Pending)
        .await;
    assert!(matches!(
        result,
        Err(LifecycleError::InvalidTransition { .. })
    ));

    let stored: Order = h.store.get(&order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Delivered);
}

#[tokio::test]
async fn pending_cannot_jump_straight_to_delivered() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;
    let order = h.lifecycle.create_order(order_draft(&location)).await.unwrap();

    let result = h
        .lifecycle
        .update_status(&order.id, OrderStatus::Delivered)
        .await;
    assert!(matches!(
        result,
        Err(LifecycleError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn transfer_moves_attribution_between_locations() {
    let h = harness();
    let location_a = create_location(&h, "BUS-1", "Harbour").await;
    let location_b = create_location(&h, "BUS-1", "Market").await;

    // Order at A (usage 0 -> 1), then seed the counters to the
    // billing-period values: A = 5 (including this order), B = 2.
    let order = h
        .lifecycle
        .create_order(order_draft(&location_a))
        .await
        .unwrap();
    h.ledger.adjust_usage(&location_a.id, 4).await.unwrap();
    h.ledger.adjust_usage(&location_b.id, 2).await.unwrap();

    let transferred = h
        .lifecycle
        .transfer(&order.id, &location_b.id, Some("wrong table scanned".into()))
        .await
        .unwrap();

    assert_eq!(transferred.location.location_id, location_b.id);
    assert_eq!(
        transferred.location.previous_location_id,
        Some(location_a.id.clone())
    );
    assert!(transferred.location.transferred_at.is_some());
    assert_eq!(
        transferred.location.transfer_reason.as_deref(),
        Some("wrong table scanned")
    );
    // Billing owner follows the target location
    assert_eq!(transferred.location.business_id, location_b.business_id);

    let a: Location = h.store.get(&location_a.id).await.unwrap();
    let b: Location = h.store.get(&location_b.id).await.unwrap();
    assert_eq!(a.billing.monthly_usage, 4);
    assert_eq!(b.billing.monthly_usage, 3);
}

#[tokio::test]
async fn transfer_to_unknown_location_is_not_found() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;
    let order = h.lifecycle.create_order(order_draft(&location)).await.unwrap();

    let result = h.lifecycle.transfer(&order.id, "missing", None).await;
    assert!(matches!(
        result,
        Err(LifecycleError::Store(track_server::StoreError::NotFound(_)))
    ));

    // Order untouched, counter untouched
    let stored: Order = h.store.get(&order.id).await.unwrap();
    assert_eq!(stored.location.location_id, location.id);
    let loc: Location = h.store.get(&location.id).await.unwrap();
    assert_eq!(loc.billing.monthly_usage, 1);
}

#[tokio::test]
async fn overdue_pickup_is_auto_completed() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;
    let order = h.lifecycle.create_order(order_draft(&location)).await.unwrap();
    h.lifecycle
        .update_status(&order.id, OrderStatus::PickedUp)
        .await
        .unwrap();
    backdate_pickup(&h, &order.id, 31).await;

    let completed = h.lifecycle.auto_complete_overdue().await.unwrap();
    assert_eq!(completed, 1);

    let stored: Order = h.store.get(&order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Delivered);
    assert_eq!(
        stored.delivery_confirmation_method,
        Some(DeliveryConfirmation::AutoTimeout)
    );
    assert!(stored.delivered_at.is_some());
}

#[tokio::test]
async fn recent_pickup_is_left_alone() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;
    let order = h.lifecycle.create_order(order_draft(&location)).await.unwrap();
    h.lifecycle
        .update_status(&order.id, OrderStatus::PickedUp)
        .await
        .unwrap();
    backdate_pickup(&h, &order.id, 29).await;

    let completed = h.lifecycle.auto_complete_overdue().await.unwrap();
    assert_eq!(completed, 0);

    let stored: Order = h.store.get(&order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::PickedUp);
    assert!(stored.delivered_at.is_none());
}

#[tokio::test]
async fn pending_orders_are_never_auto_completed() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;
    let order = h.lifecycle.create_order(order_draft(&location)).await.unwrap();

    let completed = h.lifecycle.auto_complete_overdue().await.unwrap();
    assert_eq!(completed, 0);

    let stored: Order = h.store.get(&order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn scheduler_scans_at_startup_and_stops_on_shutdown() {
    use tokio_util::sync::CancellationToken;
    use track_server::AutoCompleteScheduler;

    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;
    let order = h.lifecycle.create_order(order_draft(&location)).await.unwrap();
    h.lifecycle
        .update_status(&order.id, OrderStatus::PickedUp)
        .await
        .unwrap();
    backdate_pickup(&h, &order.id, 31).await;

    let lifecycle = Arc::new(OrderLifecycle::new(
        h.store.clone(),
        h.ledger.clone(),
        Arc::new(LogNotifier),
        Duration::minutes(COMPLETE_AFTER_MINS),
    ));
    let shutdown = CancellationToken::new();
    let scheduler = AutoCompleteScheduler::new(
        lifecycle,
        shutdown.clone(),
        std::time::Duration::from_secs(600),
    );
    let handle = tokio::spawn(scheduler.run());

    // The startup scan runs before the first interval tick
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    let stored: Order = h.store.get(&order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Delivered);

    shutdown.cancel();
    tokio::time::timeout(std::time::Duration::from_secs(1), handle)
        .await
        .expect("scheduler exits promptly on shutdown")
        .unwrap();
}

#[tokio::test]
async fn usage_report_aggregates_per_business() {
    let h = harness();
    let location_a = create_location(&h, "BUS-1", "Harbour").await;
    let location_b = create_location(&h, "BUS-1", "Market").await;
    let other = create_location(&h, "BUS-2", "Elsewhere").await;

    h.ledger.adjust_usage(&location_a.id, 5).await.unwrap();
    h.ledger.adjust_usage(&location_b.id, 2).await.unwrap();
    h.ledger.adjust_usage(&other.id, 9).await.unwrap();

    let report = h.ledger.usage_report("BUS-1").await.unwrap();
    assert_eq!(report.business_id, "BUS-1");
    assert_eq!(report.total_orders, 7);
    assert_eq!(report.locations.len(), 2);
    assert!(report.locations.iter().all(|row| row.billing_active));
}

#[tokio::test]
async fn usage_can_go_negative_without_a_clamp() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;

    let updated = h.ledger.adjust_usage(&location.id, -1).await.unwrap();
    assert_eq!(updated.billing.monthly_usage, -1);
}

/// The full scenario: create pending, pick up, advance the clock past the
/// threshold, run the scan.
#[tokio::test]
async fn scan_completes_the_scenario_order() {
    let h = harness();
    let location = create_location(&h, "BUS-1", "Harbour").await;

    let order = h
        .lifecycle
        .create_order(order_draft(&location))
        .await
        .unwrap();
    assert!(!order.id.is_empty());
    assert!(order.created_at.timestamp() > 0);
    assert_eq!(order.status, OrderStatus::Pending);

    let picked = h
        .lifecycle
        .update_status(&order.id, OrderStatus::PickedUp)
        .await
        .unwrap();
    assert_eq!(picked.status, OrderStatus::PickedUp);
    assert!(picked.picked_up_at.is_some());

    backdate_pickup(&h, &order.id, 31).await;
    h.lifecycle.auto_complete_overdue().await.unwrap();

    let delivered: Order = h.store.get(&order.id).await.unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(
        delivered.delivery_confirmation_method,
        Some(DeliveryConfirmation::AutoTimeout)
    );
}
