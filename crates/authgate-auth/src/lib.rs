//! # authgate-auth
//!
//! Session lifecycle and credential checks for AuthGate.
//!
//! ## Modules
//!
//! - `session`: the in-process session store, token generation, the
//!   periodic sweeper, and the login/profile/logout flows
//! - `password`: Argon2id password hashing
//! - `account`: user registration and credential verification

pub mod account;
pub mod password;
pub mod session;

pub use account::AccountService;
pub use password::PasswordHasher;
pub use session::{LoginOutcome, SessionManager, SessionStore, SessionSweeper};
