//! Auto-complete scheduler
//!
//! Runs the overdue-order scan immediately at startup, then on a fixed
//! interval for the life of the process. The interval is intentionally
//! shorter than the completion threshold, so no order waits more than
//! threshold + interval before being auto-completed.
//!
//! Registered as a periodic background task; shutdown cancels the wait,
//! never a scan already in progress.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::OrderLifecycle;

pub struct AutoCompleteScheduler {
    lifecycle: Arc<OrderLifecycle>,
    shutdown: CancellationToken,
    interval: Duration,
}

impl AutoCompleteScheduler {
    pub fn new(
        lifecycle: Arc<OrderLifecycle>,
        shutdown: CancellationToken,
        interval: Duration,
    ) -> Self {
        Self {
            lifecycle,
            shutdown,
            interval,
        }
    }

    /// Main loop: startup scan, then periodic trigger until shutdown.
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Auto-complete scheduler started"
        );

        self.scan().await;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Auto-complete scheduler stopped");
                    return;
                }
            }
            self.scan().await;
        }
    }

    async fn scan(&self) {
        match self.lifecycle.auto_complete_overdue().await {
            Ok(0) => tracing::debug!("No overdue orders"),
            Ok(completed) => tracing::info!(completed, "Auto-completed overdue orders"),
            Err(e) => tracing::error!(error = %e, "Overdue order scan failed"),
        }
    }
}
