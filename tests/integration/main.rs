//! Integration tests driving the HTTP router end to end.

mod auth_test;
mod health_test;
mod helpers;
mod session_test;
