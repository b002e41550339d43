//! Organization Aggregate
//!
//! Organizations group users. An organization cannot be removed while it
//! still has members.

pub mod api;
pub mod entity;
pub mod repository;
pub mod service;

pub use api::{organizations_router, OrganizationsState};
pub use entity::{Organization, OrganizationDetails, OrganizationInput};
pub use repository::OrganizationRepository;
pub use service::OrganizationService;
