//! Route handlers.

pub mod auth;
pub mod fallback;
pub mod health;
pub mod profile;
