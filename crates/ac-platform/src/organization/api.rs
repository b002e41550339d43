//! Organizations API

use axum::{
    extract::{Path, State},
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::organization::entity::{Organization, OrganizationDetails, OrganizationInput};
use crate::organization::service::OrganizationService;
use crate::shared::api_common::SuccessResponse;
use crate::shared::error::{ErrorResponse, PlatformError};

/// Organizations service state
#[derive(Clone)]
pub struct OrganizationsState {
    pub organization_service: OrganizationService,
}

/// List organizations
#[utoipa::path(
    get,
    path = "/organizations/",
    tag = "organizations",
    responses(
        (status = 200, description = "All organizations", body = Vec<Organization>)
    )
)]
pub async fn list_organizations(
    State(state): State<OrganizationsState>,
) -> Result<Json<Vec<Organization>>, PlatformError> {
    Ok(Json(state.organization_service.get_all().await?))
}

/// Create an organization
#[utoipa::path(
    post,
    path = "/organizations/",
    tag = "organizations",
    request_body = OrganizationInput,
    responses(
        (status = 200, description = "Organization created", body = OrganizationDetails),
        (status = 400, description = "Validation error or duplicate name", body = ErrorResponse)
    )
)]
pub async fn create_organization(
    State(state): State<OrganizationsState>,
    Json(req): Json<OrganizationInput>,
) -> Result<Json<OrganizationDetails>, PlatformError> {
    Ok(Json(state.organization_service.create(&req).await?))
}

/// Get organization with its users
#[utoipa::path(
    get,
    path = "/organizations/{id}",
    tag = "organizations",
    params(("id" = i64, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization found", body = OrganizationDetails),
        (status = 400, description = "Organization does not exist", body = ErrorResponse)
    )
)]
pub async fn get_organization(
    State(state): State<OrganizationsState>,
    Path(id): Path<i64>,
) -> Result<Json<OrganizationDetails>, PlatformError> {
    Ok(Json(state.organization_service.get_details(id).await?))
}

/// Rename an organization
#[utoipa::path(
    put,
    path = "/organizations/{id}",
    tag = "organizations",
    params(("id" = i64, Path, description = "Organization ID")),
    request_body = OrganizationInput,
    responses(
        (status = 200, description = "Organization updated", body = OrganizationDetails),
        (status = 400, description = "Organization does not exist or name taken", body = ErrorResponse)
    )
)]
pub async fn update_organization(
    State(state): State<OrganizationsState>,
    Path(id): Path<i64>,
    Json(req): Json<OrganizationInput>,
) -> Result<Json<OrganizationDetails>, PlatformError> {
    Ok(Json(state.organization_service.update(id, &req).await?))
}

/// Delete an organization without users
#[utoipa::path(
    delete,
    path = "/organizations/{id}",
    tag = "organizations",
    params(("id" = i64, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization deleted", body = SuccessResponse),
        (status = 400, description = "Organization does not exist or still has users", body = ErrorResponse)
    )
)]
pub async fn delete_organization(
    State(state): State<OrganizationsState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, PlatformError> {
    state.organization_service.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Create organizations router
pub fn organizations_router(state: OrganizationsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_organizations, create_organization))
        .routes(routes!(get_organization, update_organization, delete_organization))
        .with_state(state)
}
