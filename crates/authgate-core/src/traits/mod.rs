//! Core trait definitions shared across AuthGate crates.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
