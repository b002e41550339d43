//! Shared building blocks for the access control crates.

pub mod logging;
pub mod time;

pub use time::{from_millis, from_millis_opt, now_millis};
