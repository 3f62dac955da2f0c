//! Session lifecycle management: creation, validation, expiry and logout.

pub mod manager;
pub mod store;
pub mod sweeper;
pub mod token;

pub use manager::{LoginOutcome, SessionManager};
pub use store::{IssuedSession, SessionStore};
pub use sweeper::SessionSweeper;
pub use token::generate_token;
