//! Right Aggregate
//!
//! A right is a named permission that roles bundle together.

pub mod api;
pub mod entity;
pub mod repository;
pub mod service;

pub use api::{rights_router, RightsState};
pub use entity::{Right, RightInput};
pub use repository::RightRepository;
pub use service::RightService;
