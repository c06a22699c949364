//! Entity trait implementations for the domain models.
//!
//! Orders live in their own table; every other type shares the `entity`
//! table behind a `type` discriminator. Owner paths are the serialized
//! (camelCase) field names.

use chrono::{DateTime, Utc};
use shared::models::{FraudClaim, Location, MenuItem, Order, User};
use shared::models::{FraudClaimUpdate, LocationUpdate, MenuItemUpdate, OrderUpdate, UserUpdate};

use super::{Deletable, ENTITY_TABLE, Entity, ORDER_TABLE};

impl Entity for Order {
    const TABLE: &'static str = ORDER_TABLE;
    const KIND: Option<&'static str> = None;
    // The billing owner of an order hangs off its location attribution.
    const OWNER_PATH: &'static str = "location.businessId";
    type Update = OrderUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_identity(&mut self, id: String, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }
}

impl Entity for Location {
    const TABLE: &'static str = ENTITY_TABLE;
    const KIND: Option<&'static str> = Some("location");
    const OWNER_PATH: &'static str = "businessId";
    type Update = LocationUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_identity(&mut self, id: String, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }
}

impl Entity for MenuItem {
    const TABLE: &'static str = ENTITY_TABLE;
    const KIND: Option<&'static str> = Some("menu_item");
    const OWNER_PATH: &'static str = "businessId";
    type Update = MenuItemUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_identity(&mut self, id: String, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }
}

impl Entity for User {
    const TABLE: &'static str = ENTITY_TABLE;
    const KIND: Option<&'static str> = Some("user");
    const OWNER_PATH: &'static str = "businessId";
    type Update = UserUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_identity(&mut self, id: String, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }
}

impl Entity for FraudClaim {
    const TABLE: &'static str = ENTITY_TABLE;
    const KIND: Option<&'static str> = Some("fraud_claim");
    const OWNER_PATH: &'static str = "businessId";
    type Update = FraudClaimUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_identity(&mut self, id: String, created_at: DateTime<Utc>) {
        self.id = id;
        self.created_at = created_at;
    }
}

impl Deletable for MenuItem {}
impl Deletable for User {}
impl Deletable for FraudClaim {}
