//! Right Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named permission. Summary and details share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Right {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Unset until the first update
    pub modified_at: Option<DateTime<Utc>>,
}

/// Create and update payload
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RightInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl RightInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
