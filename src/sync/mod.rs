//! Synchronization Module
//!
//! Ties the remote store, the query caches and the mutation gate together
//! behind a single process-wide store.

mod mutation;
mod store;

pub use mutation::{MutationCoordinator, MutationGuard};
pub use store::SyncStore;
