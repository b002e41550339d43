//! Role Aggregate
//!
//! Roles bundle rights and are assigned to users.
//!
//! - `entity` - Role and its details view
//! - `repository` - roles table plus the role/right links
//! - `service` - validation and link management
//! - `api` - REST endpoints

pub mod api;
pub mod entity;
pub mod repository;
pub mod service;

pub use api::{roles_router, RolesState};
pub use entity::{Role, RoleDetails, RoleInput};
pub use repository::RoleRepository;
pub use service::RoleService;
