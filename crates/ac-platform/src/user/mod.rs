//! User Aggregate
//!
//! Users belong to exactly one organization and hold any number of roles.

pub mod api;
pub mod entity;
pub mod repository;
pub mod service;

pub use api::{users_router, UsersState};
pub use entity::{User, UserCreate, UserDetails, UserSummary, UserUpdate};
pub use repository::UserRepository;
pub use service::UserService;
