//! In-memory user directory.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::user::{NewUser, User, UserId};

use crate::directory::UserDirectory;

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

/// Process-local user directory for development and tests.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    inner: RwLock<Inner>,
}

impl MemoryUserDirectory {
    /// Create an empty directory. Ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut inner = self.inner.write().await;

        if inner
            .users
            .values()
            .any(|u| u.username == user.username)
        {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }

        inner.next_id += 1;
        let created = User {
            id: inner.next_id,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        inner.users.insert(created.id, created.clone());

        debug!(user_id = created.id, username = %created.username, "User created in memory");
        Ok(created)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
