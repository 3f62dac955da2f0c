//! User directory trait for pluggable user backends.

use async_trait::async_trait;

use authgate_core::result::AppResult;
use authgate_entity::user::{NewUser, User, UserId};

/// Lookup and registration of users.
///
/// Implementations only store and fetch; password verification happens in
/// the auth layer against [`User::password_hash`].
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by login name. Returns `None` if no such user exists.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by id. Returns `None` if no such user exists.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with a conflict if the username is taken.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// List all users ordered by id.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
