//! # authgate-api
//!
//! HTTP API layer for AuthGate built on Axum.
//!
//! Provides the login, profile, logout and health endpoints, the session
//! cookie extractor, request logging, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
