//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the store.
//!
//! # Tasks
//! - Revalidation: periodically re-reads orders and products so stale
//!   entries are refreshed without waiting for a user-driven read

mod refresh;

pub use refresh::spawn_refresh_task;
