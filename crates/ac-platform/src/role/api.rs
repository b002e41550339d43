//! Roles API
//!
//! REST endpoints for role management and role/right links.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::role::entity::{Role, RoleDetails, RoleInput};
use crate::role::service::RoleService;
use crate::shared::api_common::SuccessResponse;
use crate::shared::error::{ErrorResponse, PlatformError};

/// Roles service state
#[derive(Clone)]
pub struct RolesState {
    pub role_service: RoleService,
}

/// List roles
#[utoipa::path(
    get,
    path = "/roles/",
    tag = "roles",
    responses(
        (status = 200, description = "All roles", body = Vec<Role>)
    )
)]
pub async fn list_roles(State(state): State<RolesState>) -> Result<Json<Vec<Role>>, PlatformError> {
    Ok(Json(state.role_service.get_all().await?))
}

/// Create a role
#[utoipa::path(
    post,
    path = "/roles/",
    tag = "roles",
    request_body = RoleInput,
    responses(
        (status = 200, description = "Role created", body = RoleDetails),
        (status = 400, description = "Validation error or duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_role(
    State(state): State<RolesState>,
    Json(req): Json<RoleInput>,
) -> Result<Json<RoleDetails>, PlatformError> {
    Ok(Json(state.role_service.create(&req).await?))
}

/// Get role with its rights
#[utoipa::path(
    get,
    path = "/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role found", body = RoleDetails),
        (status = 400, description = "Role does not exist", body = ErrorResponse)
    )
)]
pub async fn get_role(
    State(state): State<RolesState>,
    Path(id): Path<i64>,
) -> Result<Json<RoleDetails>, PlatformError> {
    Ok(Json(state.role_service.get_details(id).await?))
}

/// Update a role
#[utoipa::path(
    put,
    path = "/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role ID")),
    request_body = RoleInput,
    responses(
        (status = 200, description = "Role updated", body = RoleDetails),
        (status = 400, description = "Role does not exist or name taken", body = ErrorResponse)
    )
)]
pub async fn update_role(
    State(state): State<RolesState>,
    Path(id): Path<i64>,
    Json(req): Json<RoleInput>,
) -> Result<Json<RoleDetails>, PlatformError> {
    Ok(Json(state.role_service.update(id, &req).await?))
}

/// Delete a role
#[utoipa::path(
    delete,
    path = "/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role deleted", body = SuccessResponse),
        (status = 400, description = "Role does not exist", body = ErrorResponse)
    )
)]
pub async fn delete_role(
    State(state): State<RolesState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, PlatformError> {
    state.role_service.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Attach rights to a role
#[utoipa::path(
    put,
    path = "/roles/{id}/rights",
    tag = "roles",
    params(("id" = i64, Path, description = "Role ID")),
    request_body(content = Vec<i64>, description = "Right IDs to attach"),
    responses(
        (status = 200, description = "Rights attached", body = RoleDetails),
        (status = 400, description = "Role or a right does not exist", body = ErrorResponse)
    )
)]
pub async fn add_role_rights(
    State(state): State<RolesState>,
    Path(id): Path<i64>,
    Json(right_ids): Json<Vec<i64>>,
) -> Result<Json<RoleDetails>, PlatformError> {
    Ok(Json(state.role_service.add_rights(id, &right_ids).await?))
}

/// Detach rights from a role
#[utoipa::path(
    delete,
    path = "/roles/{id}/rights",
    tag = "roles",
    params(("id" = i64, Path, description = "Role ID")),
    request_body(content = Vec<i64>, description = "Right IDs to detach"),
    responses(
        (status = 200, description = "Rights detached", body = RoleDetails),
        (status = 400, description = "Role or a right does not exist", body = ErrorResponse)
    )
)]
pub async fn remove_role_rights(
    State(state): State<RolesState>,
    Path(id): Path<i64>,
    Json(right_ids): Json<Vec<i64>>,
) -> Result<Json<RoleDetails>, PlatformError> {
    Ok(Json(state.role_service.remove_rights(id, &right_ids).await?))
}

/// Create roles router
pub fn roles_router(state: RolesState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_roles, create_role))
        .routes(routes!(get_role, update_role, delete_role))
        .routes(routes!(add_role_rights, remove_role_rights))
        .with_state(state)
}
