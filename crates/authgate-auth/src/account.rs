//! User registration and credential verification.

use std::sync::Arc;

use tracing::{debug, info};

use authgate_core::config::SeedUser;
use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_database::UserDirectory;
use authgate_entity::user::{NewUser, User, UserId};

use crate::password::PasswordHasher;

/// Credential checks and account creation over a [`UserDirectory`].
#[derive(Debug, Clone)]
pub struct AccountService {
    directory: Arc<dyn UserDirectory>,
    hasher: PasswordHasher,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            directory,
            hasher: PasswordHasher::new(),
        }
    }

    /// The directory this service reads from.
    pub fn directory(&self) -> &Arc<dyn UserDirectory> {
        &self.directory
    }

    /// Register a user with a freshly hashed password.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }
        if password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let password_hash = run_blocking(move || hasher.hash_password(&password)).await?;
        let user = self
            .directory
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check a username/password pair.
    ///
    /// Returns `Ok(None)` for an unknown user and for a wrong password alike.
    /// `Err` is reserved for directory or hashing failures.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<UserId>> {
        let user = self.directory.find_by_username(username).await?;
        let hasher = self.hasher.clone();
        let password = password.to_string();

        let Some(user) = user else {
            run_blocking(move || {
                hasher.verify_dummy(&password);
                Ok(())
            })
            .await?;
            debug!(username = %username, "Login for unknown user");
            return Ok(None);
        };

        let hash = user.password_hash;
        if run_blocking(move || hasher.verify_password(&password, &hash)).await? {
            Ok(Some(user.id))
        } else {
            debug!(user_id = user.id, "Login with wrong password");
            Ok(None)
        }
    }

    /// Register each seed user, skipping names that already exist.
    ///
    /// Returns how many users were created.
    pub async fn seed(&self, users: &[SeedUser]) -> AppResult<usize> {
        let mut created = 0;
        for seed in users {
            match self.register(&seed.username, &seed.password).await {
                Ok(_) => created += 1,
                Err(e) if e.kind == ErrorKind::Conflict => {
                    debug!(username = %seed.username, "Seed user already present");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(created)
    }
}

/// Run CPU-bound Argon2 work off the async worker threads.
async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Password task panicked", e))?
}
