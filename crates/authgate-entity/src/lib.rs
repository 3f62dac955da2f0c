//! # authgate-entity
//!
//! Domain entity models for AuthGate. Database entities derive
//! `sqlx::FromRow`; value objects are plain serde types.

pub mod session;
pub mod user;
