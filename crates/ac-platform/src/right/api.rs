//! Rights API
//!
//! REST endpoints for right management.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::right::entity::{Right, RightInput};
use crate::right::service::RightService;
use crate::shared::api_common::SuccessResponse;
use crate::shared::error::{ErrorResponse, PlatformError};

/// Rights service state
#[derive(Clone)]
pub struct RightsState {
    pub right_service: RightService,
}

/// List rights
#[utoipa::path(
    get,
    path = "/rights/",
    tag = "rights",
    responses(
        (status = 200, description = "All rights", body = Vec<Right>)
    )
)]
pub async fn list_rights(State(state): State<RightsState>) -> Result<Json<Vec<Right>>, PlatformError> {
    Ok(Json(state.right_service.get_all().await?))
}

/// Create a right
#[utoipa::path(
    post,
    path = "/rights/",
    tag = "rights",
    request_body = RightInput,
    responses(
        (status = 200, description = "Right created", body = Right),
        (status = 400, description = "Validation error or duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_right(
    State(state): State<RightsState>,
    Json(req): Json<RightInput>,
) -> Result<Json<Right>, PlatformError> {
    Ok(Json(state.right_service.create(&req).await?))
}

/// Get right details
#[utoipa::path(
    get,
    path = "/rights/{id}",
    tag = "rights",
    params(("id" = i64, Path, description = "Right ID")),
    responses(
        (status = 200, description = "Right found", body = Right),
        (status = 400, description = "Right does not exist", body = ErrorResponse)
    )
)]
pub async fn get_right(
    State(state): State<RightsState>,
    Path(id): Path<i64>,
) -> Result<Json<Right>, PlatformError> {
    Ok(Json(state.right_service.get_details(id).await?))
}

/// Update a right
#[utoipa::path(
    put,
    path = "/rights/{id}",
    tag = "rights",
    params(("id" = i64, Path, description = "Right ID")),
    request_body = RightInput,
    responses(
        (status = 200, description = "Right updated", body = Right),
        (status = 400, description = "Right does not exist or name taken", body = ErrorResponse)
    )
)]
pub async fn update_right(
    State(state): State<RightsState>,
    Path(id): Path<i64>,
    Json(req): Json<RightInput>,
) -> Result<Json<Right>, PlatformError> {
    Ok(Json(state.right_service.update(id, &req).await?))
}

/// Delete a right
#[utoipa::path(
    delete,
    path = "/rights/{id}",
    tag = "rights",
    params(("id" = i64, Path, description = "Right ID")),
    responses(
        (status = 200, description = "Right deleted", body = SuccessResponse),
        (status = 400, description = "Right does not exist", body = ErrorResponse)
    )
)]
pub async fn delete_right(
    State(state): State<RightsState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, PlatformError> {
    state.right_service.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Create rights router
pub fn rights_router(state: RightsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_rights, create_right))
        .routes(routes!(get_right, update_right, delete_right))
        .with_state(state)
}
