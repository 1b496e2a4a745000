//! Background Revalidation Task
//!
//! Periodically reads both collections so stale cache entries refresh in the
//! background instead of on the next user-driven read.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::sync::SyncStore;

/// Spawns a background task that periodically revalidates the caches.
///
/// Each tick reads orders and products through the store; a stale entry
/// triggers its usual background refresh, a fresh one is a no-op. Failures
/// are logged and never stop the task.
///
/// # Arguments
/// * `store` - Shared sync store
/// * `refresh_interval_secs` - Interval in seconds between revalidation runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
pub fn spawn_refresh_task(store: Arc<SyncStore>, refresh_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(refresh_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting revalidation task with interval of {} seconds",
            refresh_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            if let Err(err) = store.orders().await {
                warn!(error = %err, "background orders revalidation failed");
            }
            if let Err(err) = store.products().await {
                warn!(error = %err, "background products revalidation failed");
            }
            // Let any stale-triggered refresh finish before the next tick
            store.settled().await;
            debug!("revalidation tick complete");
        }
    })
}
