use std::sync::Arc;
use std::time::Duration;

use crate::billing::UsageLedger;
use crate::core::{BackgroundTasks, Config, TaskKind};
use crate::orders::{AutoCompleteScheduler, OrderLifecycle};
use crate::services::{AddressVerifier, LogNotifier, Notifier, StructuralAddressVerifier};
use crate::store::DataStore;

/// Server state - shared handles to every service
///
/// Cloned freely into handlers and background tasks; everything inside is
/// an `Arc` or cheap to copy.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Persistence facade; the backend decision was made inside
    /// [`DataStore::initialize`] and holds for the whole process.
    pub store: Arc<DataStore>,
    pub ledger: UsageLedger,
    pub lifecycle: Arc<OrderLifecycle>,
    pub notifier: Arc<dyn Notifier>,
    pub address_verifier: Arc<dyn AddressVerifier>,
}

impl ServerState {
    /// Initialize all services in dependency order: the store decides its
    /// backend first, then the ledger and lifecycle stack on top of it.
    pub async fn initialize(config: &Config) -> Self {
        let store = Arc::new(DataStore::initialize(&config.store).await);
        let ledger = UsageLedger::new(store.clone());
        let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
        let lifecycle = Arc::new(OrderLifecycle::new(
            store.clone(),
            ledger.clone(),
            notifier.clone(),
            chrono::Duration::minutes(config.auto_complete_after_mins),
        ));
        let address_verifier: Arc<dyn AddressVerifier> = Arc::new(StructuralAddressVerifier);

        Self {
            config: config.clone(),
            store,
            ledger,
            lifecycle,
            notifier,
            address_verifier,
        }
    }

    /// Register background tasks. Must be called before the HTTP server
    /// starts accepting requests so the startup scan runs immediately.
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let scheduler = AutoCompleteScheduler::new(
            self.lifecycle.clone(),
            tasks.shutdown_token(),
            Duration::from_secs(self.config.auto_complete_interval_mins * 60),
        );
        tasks.spawn("auto_complete", TaskKind::Periodic, scheduler.run());
    }
}
