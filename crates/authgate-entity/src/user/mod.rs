//! User entity and related types.

pub mod model;

pub use model::{NewUser, User, UserId, UserProfile};
