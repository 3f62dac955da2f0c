//! User directory manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use authgate_core::config::{DatabaseConfig, UserDirectoryProvider};
use authgate_core::result::AppResult;
use authgate_entity::user::{NewUser, User, UserId};

use crate::connection::DatabasePool;
use crate::directory::UserDirectory;
use crate::memory::MemoryUserDirectory;
use crate::migration::run_migrations;
use crate::repositories::UserRepository;

/// User directory manager that wraps the configured backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct UserDirectoryManager {
    inner: Arc<dyn UserDirectory>,
    provider: UserDirectoryProvider,
}

impl UserDirectoryManager {
    /// Create a new directory manager from configuration.
    ///
    /// For PostgreSQL this connects the pool and, when enabled, applies
    /// pending migrations before returning.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let inner: Arc<dyn UserDirectory> = match config.provider {
            UserDirectoryProvider::Postgres => {
                info!("Initializing PostgreSQL user directory");
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Arc::new(UserRepository::new(db.into_pool()))
            }
            UserDirectoryProvider::Memory => {
                info!("Initializing in-memory user directory");
                Arc::new(MemoryUserDirectory::new())
            }
        };

        Ok(Self {
            inner,
            provider: config.provider,
        })
    }

    /// Create a manager from an existing directory (for testing).
    pub fn from_directory(directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            inner: directory,
            provider: UserDirectoryProvider::Memory,
        }
    }

    /// The backend this manager was built for.
    pub fn provider(&self) -> UserDirectoryProvider {
        self.provider
    }
}

#[async_trait]
impl UserDirectory for UserDirectoryManager {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.inner.find_by_username(username).await
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        self.inner.create(user).await
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        self.inner.list().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
