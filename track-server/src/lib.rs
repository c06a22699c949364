//! Conch Track Server - order tracking for restaurant pickup/delivery
//!
//! # Architecture
//!
//! Persistence and lifecycle service behind the order-tracking product.
//! Every entity type flows through one persistence facade that decides,
//! once per process, whether the durable remote table store or the
//! in-process fallback store serves requests.
//!
//! # Module structure
//!
//! ```text
//! track-server/src/
//! ├── core/       # config, state, server, background tasks
//! ├── store/      # persistence facade + durable/fallback backends
//! ├── orders/     # order state machine, transfers, overdue scan
//! ├── billing/    # per-location usage ledger
//! ├── services/   # consumed collaborators (notify, address verify)
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # errors, logging
//! ```

pub mod api;
pub mod billing;
pub mod core;
pub mod orders;
pub mod services;
pub mod store;
pub mod utils;

// Re-export public types
pub use crate::billing::{UsageLedger, UsageReport};
pub use crate::core::{BackgroundTasks, Config, Server, ServerState, TaskKind};
pub use crate::orders::{AutoCompleteScheduler, LifecycleError, OrderLifecycle};
pub use crate::store::{BackendMode, DataStore, StoreError};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load the environment and initialize logging. Called once, before
/// anything reads configuration.
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ______                 __
  / ____/___  ____  _____/ /_
 / /   / __ \/ __ \/ ___/ __ \
/ /___/ /_/ / / / / /__/ / / /
\____/\____/_/ /_/\___/_/ /_/
    ______                __
   /_  __/________ ______/ /__
    / / / ___/ __ `/ ___/ //_/
   / / / /  / /_/ / /__/ ,<
  /_/ /_/   \__,_/\___/_/|_|
    "#
    );
}
