//! Orders Module
//!
//! Owns the order state machine (`pending -> picked_up -> delivered`),
//! location transfers, and the timeout-driven auto-completion job.

pub mod lifecycle;
pub mod timeout_scheduler;

pub use lifecycle::{LifecycleError, LifecycleResult, OrderLifecycle};
pub use timeout_scheduler::AutoCompleteScheduler;
