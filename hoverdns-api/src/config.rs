//! Client construction parameters.

use std::time::Duration;

/// Production API root.
pub const HOVER_API_BASE: &str = "https://www.hover.com/api";

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default per-request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings resolved once when a [`Client`](crate::Client) is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash.
    pub base_url: String,
    /// Upper bound for each individual network call.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Emit (truncated) response bodies at debug level.
    pub log_bodies: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: HOVER_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            log_bodies: false,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_log_bodies(mut self, log_bodies: bool) -> Self {
        self.log_bodies = log_bodies;
        self
    }
}
