//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_STALE_WINDOW_MS;

/// Synchronization layer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote order-management API
    pub base_url: String,
    /// Staleness window in seconds for cached query results
    pub stale_window_secs: u64,
    /// Per-request timeout in seconds for the HTTP client
    pub request_timeout_secs: u64,
    /// Background revalidation interval in seconds
    pub refresh_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_BASE_URL` - Remote API base URL (default: the hosted e-commerce API)
    /// - `STALE_WINDOW` - Staleness window in seconds (default: 30)
    /// - `REQUEST_TIMEOUT` - HTTP request timeout in seconds (default: 30)
    /// - `REFRESH_INTERVAL` - Background revalidation interval in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "https://api-ecommerce-xi-tawny.vercel.app".to_string()),
            stale_window_secs: env::var("STALE_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_STALE_WINDOW_MS / 1000),
            request_timeout_secs: env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            refresh_interval_secs: env::var("REFRESH_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Staleness window in milliseconds, as the cache layer consumes it.
    pub fn stale_window_ms(&self) -> u64 {
        self.stale_window_secs * 1000
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://api-ecommerce-xi-tawny.vercel.app".to_string(),
            stale_window_secs: DEFAULT_STALE_WINDOW_MS / 1000,
            request_timeout_secs: 30,
            refresh_interval_secs: 60,
        }
    }
}
