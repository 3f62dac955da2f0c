//! # authgate-database
//!
//! User directory for AuthGate: the `UserDirectory` trait, a PostgreSQL
//! implementation with migrations, an in-memory implementation, and the
//! `UserDirectoryManager` that picks one from configuration.

pub mod connection;
pub mod directory;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;

pub use connection::DatabasePool;
pub use directory::UserDirectory;
pub use memory::MemoryUserDirectory;
pub use provider::UserDirectoryManager;
