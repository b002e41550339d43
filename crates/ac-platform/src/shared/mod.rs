//! Shared infrastructure: errors, persistence, validation and common API types.

pub mod api_common;
pub mod database;
pub mod error;
pub mod health_api;
pub mod validation;
