//! Order Sync - a client-side synchronization layer for a remote
//! order-management API
//!
//! Keeps local views of orders and products consistent with a remote REST
//! service across create/update/delete operations, with stale-while-revalidate
//! caching and de-duplicated fetches.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod remote;
pub mod sync;
pub mod tasks;

pub use config::Config;
pub use error::{Result, SyncError};
pub use sync::SyncStore;
pub use tasks::spawn_refresh_task;
