//! Credential handling for user accounts.

pub mod password_service;

pub use password_service::{Argon2Config, PasswordPolicy, PasswordService};
