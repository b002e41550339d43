//! Common API types

use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success response with optional message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

/// `GET /` sends browsers to the API documentation.
pub async fn redirect_to_docs() -> Redirect {
    Redirect::temporary("/docs/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_omits_empty_message() {
        let json = serde_json::to_string(&SuccessResponse::ok()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
