//! Persistence Facade
//!
//! Single CRUD surface for every entity type, agnostic to which backend
//! is serving requests. The backend decision is made once, inside
//! [`DataStore::initialize`], and never revisited: a failed startup probe
//! permanently downgrades the process to the fallback store, while a
//! failed individual call is retried against the fallback store for that
//! call only. The asymmetry is deliberate: availability over durability.

use std::sync::Arc;

use serde_json::Value;

use super::{
    Deletable, Entity, MemStore, RemoteConfig, RemoteTable, ScanFilter, StoreError, StoreResult,
    TableBackend, merge,
};

/// Which backend was selected at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Durable remote table store, mirrored into the fallback store.
    Remote,
    /// In-process fallback store only.
    Memory,
}

/// Store-level configuration, resolved from the environment by the server
/// config.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Master switch for the durable backend.
    pub use_durable_backend: bool,
    /// Operator override: skip the probe and run in-memory.
    pub force_fallback: bool,
    pub remote: RemoteConfig,
}

/// Persistence facade over the durable backend and the fallback store.
pub struct DataStore {
    mode: BackendMode,
    durable: Option<Arc<dyn TableBackend>>,
    cache: MemStore,
}

impl DataStore {
    /// Resolve the backend mode for the life of this process.
    ///
    /// Configuration can disable the durable backend outright; otherwise
    /// one connection attempt plus one bounded existence probe decides.
    /// Probe failure is logged once and is sticky; there is no later
    /// promotion back to the durable backend.
    pub async fn initialize(config: &StoreConfig) -> Self {
        if !config.use_durable_backend || config.force_fallback {
            tracing::info!("Durable backend disabled by configuration, using in-memory store");
            return Self::in_memory();
        }

        match Self::connect_and_probe(&config.remote).await {
            Ok(remote) => {
                tracing::info!(url = %config.remote.url, "Durable backend active");
                Self {
                    mode: BackendMode::Remote,
                    durable: Some(Arc::new(remote)),
                    cache: MemStore::new(),
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Durable backend unreachable at startup, running on the in-memory store for the rest of this process"
                );
                Self::in_memory()
            }
        }
    }

    async fn connect_and_probe(config: &RemoteConfig) -> StoreResult<RemoteTable> {
        let remote = RemoteTable::connect(config).await?;
        remote.probe(super::ORDER_TABLE).await?;
        Ok(remote)
    }

    /// Fallback-store-only facade. Also the test constructor.
    pub fn in_memory() -> Self {
        Self {
            mode: BackendMode::Memory,
            durable: None,
            cache: MemStore::new(),
        }
    }

    /// Remote-mode facade over an arbitrary durable backend. Lets tests
    /// replay failover behavior without a process restart.
    pub fn with_durable(backend: Arc<dyn TableBackend>) -> Self {
        Self {
            mode: BackendMode::Remote,
            durable: Some(backend),
            cache: MemStore::new(),
        }
    }

    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    /// Assign identity, write through the active backend, return the
    /// stored record. The fallback store cannot fail, so creation always
    /// succeeds even while the durable backend is flapping.
    pub async fn create<E: Entity>(&self, mut record: E) -> StoreResult<E> {
        record.assign_identity(shared::util::record_id(), shared::util::now());
        let id = record.id().to_string();
        let value = to_stored(&record)?;

        if let Some(remote) = &self.durable {
            if let Err(e) = remote.put_item(E::TABLE, &id, value.clone()).await {
                tracing::warn!(
                    error = %e,
                    table = E::TABLE,
                    id = %id,
                    "Durable write failed, record served from fallback store for this call"
                );
            }
        }
        self.cache.put(E::TABLE, &id, value);
        Ok(record)
    }

    /// Fetch one record. A durable read refreshes the fallback copy; a
    /// durable failure serves the fallback copy for this call only.
    pub async fn get<E: Entity>(&self, id: &str) -> StoreResult<E> {
        let value = match &self.durable {
            Some(remote) => match remote.get_item(E::TABLE, id).await {
                Ok(Some(value)) => {
                    self.cache.put(E::TABLE, id, value.clone());
                    Some(value)
                }
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        table = E::TABLE,
                        id = %id,
                        "Durable read failed, serving from fallback store"
                    );
                    self.cache.get(E::TABLE, id)
                }
            },
            None => self.cache.get(E::TABLE, id),
        };

        let value = value.ok_or_else(|| not_found::<E>(id))?;
        from_stored(value)
    }

    /// List all records of a type, optionally scoped to one business.
    /// Ordering is whatever the active backend returns.
    pub async fn get_all<E: Entity>(&self, business_id: Option<&str>) -> StoreResult<Vec<E>> {
        let filter = ScanFilter {
            kind: E::KIND,
            owner: business_id.map(|b| (E::OWNER_PATH, b)),
        };

        let values = match &self.durable {
            Some(remote) => match remote.scan_items(E::TABLE, filter).await {
                Ok(values) => {
                    for value in &values {
                        if let Some(id) = value.get("id").and_then(Value::as_str) {
                            self.cache.put(E::TABLE, id, value.clone());
                        }
                    }
                    values
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        table = E::TABLE,
                        "Durable scan failed, serving from fallback store"
                    );
                    self.cache.scan(E::TABLE, filter)
                }
            },
            None => self.cache.scan(E::TABLE, filter),
        };

        values.into_iter().map(from_stored).collect()
    }

    /// Merge a typed partial update into the stored record and refresh
    /// `updatedAt`. Top-level fields replace wholesale; the merge runs
    /// under the fallback store's entry guard when that is the target.
    pub async fn update<E: Entity>(&self, id: &str, patch: E::Update) -> StoreResult<E> {
        let mut delta =
            serde_json::to_value(&patch).map_err(|e| StoreError::Validation(e.to_string()))?;
        let Value::Object(fields) = &mut delta else {
            return Err(StoreError::Validation(
                "update payload must be an object".to_string(),
            ));
        };
        fields.insert(
            "updatedAt".to_string(),
            serde_json::to_value(shared::util::now())
                .map_err(|e| StoreError::Validation(e.to_string()))?,
        );

        let merged = match &self.durable {
            Some(remote) => match remote.get_item(E::TABLE, id).await {
                Ok(Some(mut current)) => {
                    merge::merge_fields(&mut current, &delta);
                    if let Err(e) = remote.put_item(E::TABLE, id, current.clone()).await {
                        tracing::warn!(
                            error = %e,
                            table = E::TABLE,
                            id = %id,
                            "Durable write failed, merged record kept in fallback store"
                        );
                    }
                    self.cache.put(E::TABLE, id, current.clone());
                    current
                }
                Ok(None) => return Err(not_found::<E>(id)),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        table = E::TABLE,
                        id = %id,
                        "Durable read failed, merging into fallback store"
                    );
                    self.cache
                        .merge(E::TABLE, id, &delta)
                        .ok_or_else(|| not_found::<E>(id))?
                }
            },
            None => self
                .cache
                .merge(E::TABLE, id, &delta)
                .ok_or_else(|| not_found::<E>(id))?,
        };

        from_stored(merged)
    }

    /// Physically remove a record. Only entity types with a delete path
    /// implement [`Deletable`]; orders and locations do not compile here.
    pub async fn delete<E: Deletable>(&self, id: &str) -> StoreResult<bool> {
        let remote_removed = match &self.durable {
            Some(remote) => match remote.delete_item(E::TABLE, id).await {
                Ok(removed) => Some(removed),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        table = E::TABLE,
                        id = %id,
                        "Durable delete failed, removing from fallback store only"
                    );
                    None
                }
            },
            None => None,
        };
        let cache_removed = self.cache.remove(E::TABLE, id);
        Ok(remote_removed.unwrap_or(false) || cache_removed)
    }
}

fn label<E: Entity>() -> &'static str {
    E::KIND.unwrap_or(E::TABLE)
}

fn not_found<E: Entity>(id: &str) -> StoreError {
    StoreError::NotFound(format!("{} {} not found", label::<E>(), id))
}

/// Serialize a record for storage, stamping the `type` discriminator for
/// entity types that share the multiplexed table.
fn to_stored<E: Entity>(record: &E) -> StoreResult<Value> {
    let mut value =
        serde_json::to_value(record).map_err(|e| StoreError::Adapter(e.to_string()))?;
    if let (Some(kind), Value::Object(map)) = (E::KIND, &mut value) {
        map.insert("type".to_string(), Value::String(kind.to_string()));
    }
    Ok(value)
}

fn from_stored<E: Entity>(value: Value) -> StoreResult<E> {
    serde_json::from_value(value).map_err(|e| StoreError::Adapter(e.to_string()))
}
