//! Facade failover integration tests
//!
//! With the durable backend failing on every call, the facade must keep
//! serving every operation from the fallback store without surfacing an
//! error and without flipping the process-wide backend mode.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use shared::models::{User, UserCreate, UserRole, UserUpdate};
use track_server::store::{ScanFilter, StoreResult, TableBackend};
use track_server::{BackendMode, DataStore, StoreError};

/// Durable backend where every call fails, counting the attempts.
#[derive(Default)]
struct FlappingBackend {
    calls: AtomicUsize,
}

impl FlappingBackend {
    fn fail<T>(&self) -> StoreResult<T> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(StoreError::Adapter("connection timed out".to_string()))
    }
}

#[async_trait]
impl TableBackend for FlappingBackend {
    async fn put_item(&self, _: &str, _: &str, _: Value) -> StoreResult<()> {
        self.fail()
    }
    async fn get_item(&self, _: &str, _: &str) -> StoreResult<Option<Value>> {
        self.fail()
    }
    async fn scan_items(&self, _: &str, _: ScanFilter<'_>) -> StoreResult<Vec<Value>> {
        self.fail()
    }
    async fn delete_item(&self, _: &str, _: &str) -> StoreResult<bool> {
        self.fail()
    }
}

fn user_draft(name: &str) -> User {
    User::from(UserCreate {
        business_id: "BUS-1".to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: UserRole::Staff,
        phone: None,
    })
}

#[tokio::test]
async fn every_operation_survives_a_dead_durable_backend() {
    let backend = Arc::new(FlappingBackend::default());
    let store = DataStore::with_durable(backend.clone());
    assert_eq!(store.mode(), BackendMode::Remote);

    // create
    let created = store.create(user_draft("Avery")).await.unwrap();
    assert!(!created.id.is_empty());

    // get returns what was just created
    let fetched: User = store.get(&created.id).await.unwrap();
    assert_eq!(fetched.name, "Avery");

    // get_all
    store.create(user_draft("Brook")).await.unwrap();
    let all: Vec<User> = store.get_all(Some("BUS-1")).await.unwrap();
    assert_eq!(all.len(), 2);

    // update
    let patch = UserUpdate {
        name: Some("Avery Chen".to_string()),
        ..Default::default()
    };
    let updated = store.update::<User>(&created.id, patch).await.unwrap();
    assert_eq!(updated.name, "Avery Chen");
    assert!(updated.updated_at.is_some());

    // delete
    assert!(store.delete::<User>(&created.id).await.unwrap());
    assert!(matches!(
        store.get::<User>(&created.id).await,
        Err(StoreError::NotFound(_))
    ));

    // The durable backend really was attempted, and the mode never moved.
    assert!(backend.calls.load(Ordering::Relaxed) >= 5);
    assert_eq!(store.mode(), BackendMode::Remote);
}

#[tokio::test]
async fn not_found_still_surfaces_while_flapping() {
    let store = DataStore::with_durable(Arc::new(FlappingBackend::default()));
    assert!(matches!(
        store.get::<User>("never-created").await,
        Err(StoreError::NotFound(_))
    ));
}

/// Durable backend that works until told otherwise, backed by its own
/// map. Lets the write-through mirror be observed after the backend dies.
struct ToggleBackend {
    inner: track_server::store::MemStore,
    down: std::sync::atomic::AtomicBool,
}

impl ToggleBackend {
    fn new() -> Self {
        Self {
            inner: track_server::store::MemStore::new(),
            down: std::sync::atomic::AtomicBool::new(false),
        }
    }

    fn take_down(&self) {
        self.down.store(true, Ordering::Relaxed);
    }

    fn check(&self) -> StoreResult<()> {
        if self.down.load(Ordering::Relaxed) {
            Err(StoreError::Adapter("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TableBackend for ToggleBackend {
    async fn put_item(&self, table: &str, id: &str, item: Value) -> StoreResult<()> {
        self.check()?;
        self.inner.put_item(table, id, item).await
    }
    async fn get_item(&self, table: &str, id: &str) -> StoreResult<Option<Value>> {
        self.check()?;
        self.inner.get_item(table, id).await
    }
    async fn scan_items(&self, table: &str, filter: ScanFilter<'_>) -> StoreResult<Vec<Value>> {
        self.check()?;
        self.inner.scan_items(table, filter).await
    }
    async fn delete_item(&self, table: &str, id: &str) -> StoreResult<bool> {
        self.check()?;
        self.inner.delete_item(table, id).await
    }
}

#[tokio::test]
async fn successful_durable_writes_warm_the_fallback_store() {
    let backend = Arc::new(ToggleBackend::new());
    let store = DataStore::with_durable(backend.clone());

    // Written while the durable backend is healthy
    let created = store.create(user_draft("Devon")).await.unwrap();
    let listed: Vec<User> = store.get_all(Some("BUS-1")).await.unwrap();
    assert_eq!(listed.len(), 1);

    // Backend dies; the write-through copy keeps serving reads
    backend.take_down();
    let fetched: User = store.get(&created.id).await.unwrap();
    assert_eq!(fetched.name, "Devon");
    let listed: Vec<User> = store.get_all(Some("BUS-1")).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(store.mode(), BackendMode::Remote);
}

#[tokio::test]
async fn memory_mode_never_consults_a_durable_backend() {
    let store = DataStore::in_memory();
    assert_eq!(store.mode(), BackendMode::Memory);

    let created = store.create(user_draft("Casey")).await.unwrap();
    let fetched: User = store.get(&created.id).await.unwrap();
    assert_eq!(fetched.email, "casey@example.com");
}
