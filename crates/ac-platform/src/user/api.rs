//! Users API
//!
//! REST endpoints for user management and role assignment.

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::shared::api_common::SuccessResponse;
use crate::shared::error::{ErrorResponse, PlatformError};
use crate::user::entity::{UserCreate, UserDetails, UserSummary, UserUpdate};
use crate::user::service::UserService;

/// Users service state
#[derive(Clone)]
pub struct UsersState {
    pub user_service: UserService,
}

/// List users
#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = Vec<UserSummary>)
    )
)]
pub async fn list_users(State(state): State<UsersState>) -> Result<Json<Vec<UserSummary>>, PlatformError> {
    Ok(Json(state.user_service.get_all().await?))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users/",
    tag = "users",
    request_body = UserCreate,
    responses(
        (status = 200, description = "User created", body = UserDetails),
        (status = 400, description = "Invalid email, email taken or unknown organization", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<UsersState>,
    Json(req): Json<UserCreate>,
) -> Result<Json<UserDetails>, PlatformError> {
    Ok(Json(state.user_service.create(&req).await?))
}

/// Get user with organization and roles
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserDetails),
        (status = 400, description = "User does not exist", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
) -> Result<Json<UserDetails>, PlatformError> {
    Ok(Json(state.user_service.get_details(id).await?))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated", body = UserDetails),
        (status = 400, description = "User or organization does not exist", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
    Json(req): Json<UserUpdate>,
) -> Result<Json<UserDetails>, PlatformError> {
    Ok(Json(state.user_service.update(id, &req).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = SuccessResponse),
        (status = 400, description = "User does not exist", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, PlatformError> {
    state.user_service.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Assign roles to a user
#[utoipa::path(
    put,
    path = "/users/{id}/roles",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body(content = Vec<i64>, description = "Role IDs to assign"),
    responses(
        (status = 200, description = "Roles assigned", body = UserDetails),
        (status = 400, description = "User or a role does not exist", body = ErrorResponse)
    )
)]
pub async fn add_user_roles(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
    Json(role_ids): Json<Vec<i64>>,
) -> Result<Json<UserDetails>, PlatformError> {
    Ok(Json(state.user_service.add_roles(id, &role_ids).await?))
}

/// Revoke roles from a user
#[utoipa::path(
    delete,
    path = "/users/{id}/roles",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body(content = Vec<i64>, description = "Role IDs to revoke"),
    responses(
        (status = 200, description = "Roles revoked", body = UserDetails),
        (status = 400, description = "User or a role does not exist", body = ErrorResponse)
    )
)]
pub async fn remove_user_roles(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
    Json(role_ids): Json<Vec<i64>>,
) -> Result<Json<UserDetails>, PlatformError> {
    Ok(Json(state.user_service.remove_roles(id, &role_ids).await?))
}

/// Create users router
pub fn users_router(state: UsersState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
        .routes(routes!(add_user_roles, remove_user_roles))
        .with_state(state)
}
