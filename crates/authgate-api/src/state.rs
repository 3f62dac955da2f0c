//! Application state shared across all handlers.

use std::sync::Arc;

use authgate_auth::SessionManager;
use authgate_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Login, session lookup and logout flows
    pub session_manager: Arc<SessionManager>,
}

impl AppState {
    /// Creates the shared state.
    pub fn new(config: Arc<AppConfig>, session_manager: Arc<SessionManager>) -> Self {
        Self {
            config,
            session_manager,
        }
    }

    /// Name of the cookie carrying the session token.
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }
}
