//! Query Cache Store Module
//!
//! Stale-while-revalidate cache for a single logical key, with
//! de-duplication of concurrent fetches.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::cache::{Clock, QueryEntry, QueryStats};
use crate::error::{Result, SyncError};

/// Outcome of one fetch, fanned out to every reader joined on it.
type FetchOutcome<T> = Result<T>;

// == Query Cache ==
/// Caches the result of one logical query (`orders`, `products`).
///
/// Read behavior:
/// - fresh value: returned immediately, no fetch
/// - stale value: returned immediately while a background refresh runs
/// - no value: the caller waits for the fetch; concurrent callers join the
///   same fetch instead of issuing duplicates
///
/// A failed fetch leaves the previous value intact and is delivered only to
/// the callers that were waiting on it.
#[derive(Debug, Clone)]
pub struct QueryCache<T> {
    inner: Arc<Inner<T>>,
}

#[derive(Debug)]
struct Inner<T> {
    /// Logical key, used for logging and diagnostics
    name: &'static str,
    /// Staleness window in milliseconds
    stale_window_ms: u64,
    /// Injectable time source
    clock: Arc<dyn Clock>,
    /// Entry, in-flight marker and counters; never locked across an await
    state: Mutex<State<T>>,
}

#[derive(Debug)]
struct State<T> {
    entry: QueryEntry<T>,
    /// Sender side of the in-flight fetch, if one is running. At most one
    /// fetch per key is in flight at any time.
    in_flight: Option<broadcast::Sender<FetchOutcome<T>>>,
    /// Bumped on invalidation; a fetch started under an older epoch stores
    /// its value but does not mark the entry fresh
    epoch: u64,
    stats: QueryStats,
}

/// Decision taken under the state lock; everything that suspends happens
/// after the lock is released.
enum ReadPlan<T> {
    Fresh(T),
    Stale {
        value: T,
        /// Set when this reader is the one starting the background refresh
        refresh_epoch: Option<u64>,
    },
    Join(broadcast::Receiver<FetchOutcome<T>>),
    Lead {
        rx: broadcast::Receiver<FetchOutcome<T>>,
        epoch: u64,
    },
}

impl<T> QueryCache<T>
where
    T: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates an empty cache for the given logical key.
    pub fn new(name: &'static str, stale_window_ms: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                stale_window_ms,
                clock,
                state: Mutex::new(State {
                    entry: QueryEntry::empty(),
                    in_flight: None,
                    epoch: 0,
                    stats: QueryStats::new(),
                }),
            }),
        }
    }

    // == Read ==
    /// Serves the latest known value, fetching only when necessary.
    ///
    /// `fetch` is invoked at most once per call, and only when this reader
    /// ends up starting a fetch. Fetches always run on a spawned task, so an
    /// abandoned reader cannot strand the callers joined on it.
    pub async fn read<F, Fut>(&self, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let plan = {
            let mut state = self.inner.state.lock().expect("query cache state poisoned");
            let now = self.inner.clock.now_ms();

            if let Some(value) = state.entry.value.clone() {
                if !state.entry.is_stale(now, self.inner.stale_window_ms) {
                    state.stats.record_hit();
                    ReadPlan::Fresh(value)
                } else {
                    state.stats.record_stale_hit();
                    let refresh_epoch = if state.in_flight.is_none() {
                        let (tx, _rx) = broadcast::channel(1);
                        state.in_flight = Some(tx);
                        Some(state.epoch)
                    } else {
                        None
                    };
                    ReadPlan::Stale {
                        value,
                        refresh_epoch,
                    }
                }
            } else if let Some(tx) = state.in_flight.clone() {
                state.stats.record_miss();
                ReadPlan::Join(tx.subscribe())
            } else {
                state.stats.record_miss();
                let (tx, rx) = broadcast::channel(1);
                state.in_flight = Some(tx);
                ReadPlan::Lead {
                    rx,
                    epoch: state.epoch,
                }
            }
        };

        match plan {
            ReadPlan::Fresh(value) => Ok(value),
            ReadPlan::Stale {
                value,
                refresh_epoch,
            } => {
                if let Some(epoch) = refresh_epoch {
                    debug!(
                        cache = self.inner.name,
                        "serving stale value, background refresh started"
                    );
                    self.spawn_fetch(fetch(), epoch);
                }
                Ok(value)
            }
            ReadPlan::Join(mut rx) => {
                debug!(cache = self.inner.name, "joining in-flight fetch");
                Self::await_outcome(&mut rx).await
            }
            ReadPlan::Lead { mut rx, epoch } => {
                debug!(cache = self.inner.name, "cache miss, fetching");
                self.spawn_fetch(fetch(), epoch);
                Self::await_outcome(&mut rx).await
            }
        }
    }

    // == Invalidate ==
    /// Marks the entry as needing revalidation.
    ///
    /// The cached value is retained and will be served stale on the next
    /// read; a fetch already in flight will not mark the entry fresh.
    pub fn invalidate(&self) {
        let mut state = self.inner.state.lock().expect("query cache state poisoned");
        state.entry.mark_invalid();
        state.epoch += 1;
        state.stats.record_invalidation();
        debug!(cache = self.inner.name, "cache entry invalidated");
    }

    // == Settled ==
    /// Waits for the in-flight fetch, if any, to complete.
    ///
    /// Returns immediately when nothing is in flight. Useful for callers
    /// that need a confirmed post-refresh view after a stale read.
    pub async fn settled(&self) {
        let rx = {
            let state = self.inner.state.lock().expect("query cache state poisoned");
            state.in_flight.as_ref().map(|tx| tx.subscribe())
        };
        if let Some(mut rx) = rx {
            let _ = rx.recv().await;
        }
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> QueryStats {
        let state = self.inner.state.lock().expect("query cache state poisoned");
        state.stats.clone()
    }

    // == Internals ==
    /// Runs the fetch on its own task and publishes the outcome.
    fn spawn_fetch<Fut>(&self, fut: Fut, epoch: u64)
    where
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = fut.await;
            inner.complete(result, epoch);
        });
    }

    async fn await_outcome(rx: &mut broadcast::Receiver<FetchOutcome<T>>) -> Result<T> {
        match rx.recv().await {
            Ok(outcome) => outcome,
            // Sender dropped without publishing: the fetch task died
            Err(_) => Err(SyncError::remote("fetch ended without a result")),
        }
    }
}

impl<T> Inner<T>
where
    T: Clone,
{
    /// Applies a fetch outcome: stores the value on success, keeps the
    /// previous value on failure, clears the in-flight marker either way,
    /// then wakes every joined reader.
    fn complete(&self, result: FetchOutcome<T>, started_epoch: u64) {
        let tx = {
            let mut state = self.state.lock().expect("query cache state poisoned");
            match &result {
                Ok(value) => {
                    let now = self.clock.now_ms();
                    state.entry.value = Some(value.clone());
                    // An invalidation that raced this fetch wins: keep the
                    // value but leave it stale so the next read re-fetches.
                    state.entry.fetched_at = if state.epoch == started_epoch {
                        Some(now)
                    } else {
                        None
                    };
                    state.stats.record_refresh();
                }
                Err(err) => {
                    state.stats.record_fetch_error();
                    warn!(cache = self.name, error = %err, "fetch failed");
                }
            }
            state.in_flight.take()
        };
        if let Some(tx) = tx {
            // No receivers is fine: a background refresh has no waiters
            let _ = tx.send(result);
        }
    }
}
