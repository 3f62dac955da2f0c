//! Login, session lookup and logout flows.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_database::UserDirectory;
use authgate_entity::session::{SessionToken, fingerprint};
use authgate_entity::user::{User, UserId};

use crate::account::AccountService;

use super::store::SessionStore;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The new session token.
    pub token: SessionToken,
    /// The authenticated user.
    pub user_id: UserId,
    /// When the session stops validating.
    pub expires_at: DateTime<Utc>,
}

/// Orchestrates credential checks against the directory and the session
/// store.
///
/// The store answers "no session" with `None`; this is the layer that turns
/// that answer into an authentication error for callers that need one.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: Arc<SessionStore>,
    accounts: AccountService,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(store: Arc<SessionStore>, accounts: AccountService) -> Self {
        Self { store, accounts }
    }

    /// The underlying session store.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// The account service used for credential checks.
    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    /// Verify credentials and open a session.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let Some(user_id) = self.accounts.authenticate(username, password).await? else {
            warn!(username = %username, "Login failed");
            return Err(AppError::authentication("Invalid username or password"));
        };

        let issued = self.store.issue(user_id);
        info!(
            user_id = user_id,
            token = issued.token.fingerprint(),
            expires_at = %issued.expires_at,
            "User logged in"
        );

        Ok(LoginOutcome {
            token: issued.token,
            user_id,
            expires_at: issued.expires_at,
        })
    }

    /// Resolve a token to its user id, or fail with an authentication error.
    pub fn authorize(&self, token: &str) -> AppResult<UserId> {
        self.store.validate(token).ok_or_else(|| {
            info!(token = fingerprint(token), "Rejected invalid or expired session");
            AppError::authentication("Invalid or expired session")
        })
    }

    /// Load the user owning a session.
    pub async fn profile(&self, token: &str) -> AppResult<User> {
        let user_id = self.authorize(token)?;

        self.accounts
            .directory()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user_id, "Session refers to a missing user");
                AppError::not_found("User not found")
            })
    }

    /// End a session. Unknown tokens are accepted silently.
    pub fn logout(&self, token: &str) {
        self.store.invalidate(token);
        info!(token = fingerprint(token), "User logged out");
    }

    /// Number of sessions currently held by the store.
    pub fn active_sessions(&self) -> usize {
        self.store.len()
    }
}
