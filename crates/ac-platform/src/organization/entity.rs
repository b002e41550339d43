//! Organization Entity

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::user::entity::UserSummary;

/// Organization summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Organization {
    pub id: i64,
    pub name: String,
}

/// Organization with its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDetails {
    pub id: i64,
    pub name: String,
    pub users: Vec<UserSummary>,
}

impl OrganizationDetails {
    pub fn new(organization: Organization, users: Vec<UserSummary>) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
            users,
        }
    }
}

/// Create and update payload
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct OrganizationInput {
    pub name: String,
}

impl OrganizationInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
