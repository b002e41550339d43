//! Access Control Platform
//!
//! REST backend for organizations, users, roles and rights, with
//! role/right and user/role links and a read-only record listing.
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain types and their summary/details views
//! - `repository` - SQL access, one stateless repository per table
//! - `service` - Business rules, one transaction per call
//! - `api` - REST endpoints

// Aggregates
pub mod organization;
pub mod user;
pub mod role;
pub mod right;
pub mod record;

// Credentials
pub mod auth;

// Shared infrastructure
pub mod shared;

// Wiring
pub mod app;
pub mod seed;

pub use shared::database::Database;
pub use shared::error::{ErrorResponse, PlatformError, Result};

pub use app::{build_router, PlatformServices};
pub use auth::password_service::{Argon2Config, PasswordPolicy, PasswordService};
pub use seed::DevDataSeeder;
pub use shared::health_api::HealthState;

// Entities and views
pub use organization::entity::{Organization, OrganizationDetails, OrganizationInput};
pub use record::entity::{NewRecord, Record};
pub use right::entity::{Right, RightInput};
pub use role::entity::{Role, RoleDetails, RoleInput};
pub use user::entity::{User, UserCreate, UserDetails, UserSummary, UserUpdate};

// Services
pub use organization::service::OrganizationService;
pub use record::service::RecordService;
pub use right::service::RightService;
pub use role::service::RoleService;
pub use user::service::UserService;
