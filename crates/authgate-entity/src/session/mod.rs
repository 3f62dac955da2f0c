//! Session value types.

pub mod token;

pub use token::{SessionToken, fingerprint};
