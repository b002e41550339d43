//! Platform Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("{entity_type} {id} does not exist")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists with {field} '{value}'")]
    Duplicate { entity_type: String, field: String, value: String },

    #[error("{entity_type} already exists with this {field}")]
    Conflict { entity_type: String, field: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlatformError {
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn duplicate(entity_type: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: entity_type.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Build a conflict from a store message such as
    /// `UNIQUE constraint failed: organizations.name`.
    pub fn conflict(message: &str) -> Self {
        let column = message
            .rsplit(": ")
            .next()
            .and_then(|columns| columns.split(", ").last())
            .unwrap_or_default();

        let (entity_type, field) = match column.split_once('.') {
            Some((table, field)) => (entity_for_table(table), field),
            None => ("Entity", "value"),
        };
        Self::Conflict {
            entity_type: entity_type.to_string(),
            field: field.to_string(),
        }
    }

    /// Errors caused by the request rather than by the platform.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Duplicate { .. }
                | Self::Conflict { .. }
                | Self::Validation { .. }
        )
    }

    fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Duplicate { .. } | Self::Conflict { .. } => "DUPLICATE",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Constraint violations raised by the store become client errors.
impl From<sqlx::Error> for PlatformError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::conflict(db_err.message());
            }
            if db_err.is_foreign_key_violation() {
                return Self::validation("Referenced entity does not exist");
            }
        }
        Self::Database(err)
    }
}

fn entity_for_table(table: &str) -> &'static str {
    match table {
        "organizations" => "Organization",
        "users" => "User",
        "roles" => "Role",
        "rights" => "Right",
        "role_rights" => "Role right",
        "user_roles" => "User role",
        "records" => "Record",
        _ => "Entity",
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Error response body
#[derive(Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self, "Unhandled platform error");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::Database;

    #[test]
    fn test_domain_errors_map_to_bad_request() {
        let cases = [
            PlatformError::not_found("Role", 7),
            PlatformError::duplicate("Role", "name", "admin"),
            PlatformError::validation("Name must not be blank"),
        ];
        for err in cases {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_unhandled_errors_map_to_server_error() {
        let err = PlatformError::internal("boom");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = PlatformError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, PlatformError::Database(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    async fn store_error(statements: &[&str]) -> PlatformError {
        let db = Database::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        let mut tx = db.begin().await.unwrap();
        for statement in statements {
            if let Err(err) = sqlx::query(statement).execute(&mut *tx).await {
                return PlatformError::from(err);
            }
        }
        panic!("statements succeeded");
    }

    #[tokio::test]
    async fn test_unique_violation_is_conflict() {
        let err = store_error(&[
            "INSERT INTO organizations (name) VALUES ('Acme')",
            "INSERT INTO organizations (name) VALUES ('Acme')",
        ])
        .await;

        assert!(matches!(err, PlatformError::Conflict { .. }));
        assert_eq!(err.to_string(), "Organization already exists with this name");
        assert!(!err.to_string().contains("UNIQUE"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_foreign_key_violation_is_validation() {
        let err = store_error(&["INSERT INTO users (email, organization_id) VALUES ('a@b.com', 42)"]).await;

        assert!(matches!(err, PlatformError::Validation { .. }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_from_store_message() {
        let err = PlatformError::conflict("UNIQUE constraint failed: user_roles.user_id, user_roles.role_id");
        assert_eq!(err.to_string(), "User role already exists with this role_id");

        let err = PlatformError::conflict("constraint failed");
        assert_eq!(err.to_string(), "Entity already exists with this value");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PlatformError::not_found("Organization", 3).to_string(),
            "Organization 3 does not exist"
        );
        assert_eq!(
            PlatformError::duplicate("Right", "name", "read").to_string(),
            "Right already exists with name 'read'"
        );
    }
}
