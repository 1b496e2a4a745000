//! Mutation Coordinator Module
//!
//! Serializes create/update/delete mutations: Idle -> Pending ->
//! {Success, Failed}. While one mutation is pending, every other submission
//! is rejected with `Busy` before any network call is made.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Result, SyncError};

// == Mutation Coordinator ==
/// Process-wide gate allowing at most one pending mutation.
///
/// Success and failure are conveyed by the mutation's returned `Result`; the
/// coordinator only tracks whether a mutation is currently pending.
#[derive(Debug, Default)]
pub struct MutationCoordinator {
    pending: AtomicBool,
}

impl MutationCoordinator {
    // == Constructor ==
    /// Creates a coordinator in the Idle state.
    pub fn new() -> Self {
        Self::default()
    }

    // == Try Begin ==
    /// Moves to Pending, or fails with `Busy` if a mutation already is.
    ///
    /// The returned guard moves the coordinator back to Idle when dropped,
    /// whether the mutation succeeded, failed, or was abandoned mid-await.
    pub fn try_begin(&self) -> Result<MutationGuard<'_>> {
        if self
            .pending
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_ok()
        {
            Ok(MutationGuard { coordinator: self })
        } else {
            Err(SyncError::Busy)
        }
    }

    // == Is Pending ==
    /// Returns true while a mutation is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

// == Mutation Guard ==
/// Releases the pending gate on drop.
#[derive(Debug)]
pub struct MutationGuard<'a> {
    coordinator: &'a MutationCoordinator,
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.coordinator.pending.store(false, Ordering::Release);
    }
}
