//! Error types for the synchronization layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Sync Error Enum ==
/// Unified error type for the synchronization layer.
///
/// The enum is `Clone` because a single fetch outcome fans out to every
/// caller that joined the in-flight request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Transport failure or non-2xx response from the remote API
    #[error("Remote request failed: {message}")]
    Remote {
        /// HTTP status code, when the failure came from a response
        status: Option<u16>,
        /// Message derived from the server body or the transport error
        message: String,
    },

    /// Client-side pre-submission check failed; no request was made
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A mutation was attempted while another one is still pending
    #[error("Another mutation is already pending")]
    Busy,
}

impl SyncError {
    // == Constructors ==
    /// Creates a `Remote` error without an HTTP status (transport-level).
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            status: None,
            message: message.into(),
        }
    }

    /// Returns true if this is a remote 404 (entity does not exist
    /// server-side). Still handled as an ordinary remote failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Remote {
                status: Some(404),
                ..
            }
        )
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the synchronization layer.
pub type Result<T> = std::result::Result<T, SyncError>;
