//! User Entity

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::organization::entity::Organization;
use crate::role::entity::Role;

/// Stored user. Holds the password hash, so it is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub organization_id: i64,
}

/// User summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_active: user.is_active,
            is_admin: user.is_admin,
        }
    }
}

/// User with organization and roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDetails {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub organization: Organization,
    pub roles: Vec<Role>,
}

impl UserDetails {
    pub fn new(user: User, organization: Organization, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_active: user.is_active,
            is_admin: user.is_admin,
            organization,
            roles,
        }
    }

    #[cfg(test)]
    pub(crate) fn role_ids(&self) -> Vec<i64> {
        self.roles.iter().map(|r| r.id).collect()
    }
}

fn default_true() -> bool {
    true
}

/// Create payload
#[derive(Clone, Deserialize, ToSchema)]
pub struct UserCreate {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Plain-text password, hashed before storage
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub organization_id: i64,
}

impl UserCreate {
    pub fn new(email: impl Into<String>, organization_id: i64) -> Self {
        Self {
            email: email.into(),
            first_name: None,
            last_name: None,
            password: None,
            is_active: true,
            is_admin: false,
            organization_id,
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}

/// Update payload. Replaces every field except the email; an absent
/// password keeps the stored one.
#[derive(Clone, Deserialize, ToSchema)]
pub struct UserUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub organization_id: i64,
}

impl UserUpdate {
    pub fn new(organization_id: i64) -> Self {
        Self {
            first_name: None,
            last_name: None,
            password: None,
            is_active: true,
            is_admin: false,
            organization_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_payload_defaults() {
        let req: UserCreate =
            serde_json::from_str(r#"{"email": "a@b.com", "organization_id": 1}"#).unwrap();
        assert!(req.is_active);
        assert!(!req.is_admin);
        assert!(req.password.is_none());
    }

    #[test]
    fn test_summary_hides_password() {
        let user = User {
            id: 1,
            email: "a@b.com".to_string(),
            first_name: None,
            last_name: None,
            password_hash: Some("$argon2id$secret".to_string()),
            is_active: true,
            is_admin: false,
            organization_id: 1,
        };
        let json = serde_json::to_string(&UserSummary::from(&user)).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
