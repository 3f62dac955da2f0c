//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lifetime of a session from creation, in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Mark the session cookie `Secure` (HTTPS only).
    #[serde(default)]
    pub cookie_secure: bool,
    /// Interval between sweeps of expired sessions, in seconds. `0` disables
    /// the sweeper and leaves expiry purely lazy.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

impl SessionConfig {
    /// Session lifetime as a chrono duration.
    pub fn ttl(&self) -> chrono::Duration {
        i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

fn default_ttl() -> u64 {
    3600
}

fn default_cookie_name() -> String {
    "sessionId".to_string()
}

fn default_cleanup_interval() -> u64 {
    300
}
