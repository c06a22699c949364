//! Store Module
//!
//! Persistence core: one facade ([`DataStore`]) over two backends with the
//! same primitive surface, the durable remote table store ([`RemoteTable`])
//! and the in-process fallback store ([`MemStore`]). Which backend is
//! active is decided once per process, at [`DataStore::initialize`].

pub mod entities;
pub mod facade;
pub mod memory;
pub mod merge;
pub mod remote;

pub use facade::{BackendMode, DataStore, StoreConfig};
pub use memory::MemStore;
pub use remote::{RemoteConfig, RemoteTable};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport/credential/schema failure talking to the durable backend.
    /// Never surfaced for a single call; the facade retries against the
    /// fallback store instead.
    #[error("Adapter error: {0}")]
    Adapter(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Adapter(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Dedicated physical table for orders.
pub const ORDER_TABLE: &str = "order";

/// Shared physical table for every other entity type, multiplexed by a
/// `type` discriminator field.
pub const ENTITY_TABLE: &str = "entity";

/// A storable domain record.
///
/// Implementations live in [`entities`]; the facade is generic over this
/// trait so every entity type gets the identical CRUD surface.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Physical table the records live in.
    const TABLE: &'static str;

    /// `type` discriminator within the shared table; `None` for entity
    /// types with a dedicated table.
    const KIND: Option<&'static str>;

    /// Dotted path to the owning business id, used by scoped listings.
    const OWNER_PATH: &'static str;

    /// Typed partial-update payload for this entity.
    type Update: Serialize + Send + Sync;

    fn id(&self) -> &str;

    /// Assigns the generated id and creation timestamp. Called exactly
    /// once, by the facade, at create time.
    fn assign_identity(&mut self, id: String, created_at: DateTime<Utc>);
}

/// Marker for entity types with a physical delete path.
///
/// Orders have no delete operation at all, and locations are only ever
/// soft-deleted, so neither implements this.
pub trait Deletable: Entity {}

/// Constraints applied by `scan_items`. Linear predicate only; the store
/// has no secondary indexes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanFilter<'a> {
    /// Restrict to one `type` within the shared table.
    pub kind: Option<&'static str>,
    /// `(field path, business id)` equality on the owning business.
    pub owner: Option<(&'static str, &'a str)>,
}

/// Primitive surface shared by both backends.
///
/// `update` is not a primitive: the facade composes it from `get_item` +
/// a shallow merge + `put_item` so merge semantics cannot diverge between
/// backends.
#[async_trait]
pub trait TableBackend: Send + Sync {
    async fn put_item(&self, table: &str, id: &str, item: Value) -> StoreResult<()>;
    async fn get_item(&self, table: &str, id: &str) -> StoreResult<Option<Value>>;
    async fn scan_items(&self, table: &str, filter: ScanFilter<'_>) -> StoreResult<Vec<Value>>;
    async fn delete_item(&self, table: &str, id: &str) -> StoreResult<bool>;
}
