//! Service wiring and HTTP router assembly.

use axum::{routing::get, Router};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::password_service::PasswordService;
use crate::organization::{organizations_router, OrganizationService, OrganizationsState};
use crate::record::{records_router, RecordService, RecordsState};
use crate::right::{rights_router, RightService, RightsState};
use crate::role::{roles_router, RoleService, RolesState};
use crate::shared::api_common::redirect_to_docs;
use crate::shared::database::Database;
use crate::shared::health_api::{health_router, HealthState};
use crate::user::{users_router, UserService, UsersState};

/// Every service, built over one shared database handle.
#[derive(Debug, Clone)]
pub struct PlatformServices {
    pub db: Database,
    pub organizations: OrganizationService,
    pub users: UserService,
    pub roles: RoleService,
    pub rights: RightService,
    pub records: RecordService,
}

impl PlatformServices {
    pub fn new(db: Database, passwords: PasswordService) -> Self {
        Self {
            organizations: OrganizationService::new(db.clone()),
            users: UserService::new(db.clone(), passwords),
            roles: RoleService::new(db.clone()),
            rights: RightService::new(db.clone()),
            records: RecordService::new(db.clone()),
            db,
        }
    }
}

/// Build the application router: resource APIs, health probes,
/// `/openapi.json`, Swagger UI under `/docs` and the `/` redirect.
pub fn build_router(services: &PlatformServices, health: HealthState) -> Router {
    let (router, mut openapi) = OpenApiRouter::new()
        .merge(organizations_router(OrganizationsState {
            organization_service: services.organizations.clone(),
        }))
        .merge(users_router(UsersState {
            user_service: services.users.clone(),
        }))
        .merge(roles_router(RolesState {
            role_service: services.roles.clone(),
        }))
        .merge(rights_router(RightsState {
            right_service: services.rights.clone(),
        }))
        .merge(records_router(RecordsState {
            record_service: services.records.clone(),
        }))
        .merge(health_router(health))
        .split_for_parts();

    openapi.info.title = "Access Control API".to_string();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    openapi.info.description =
        Some("Organizations, users, roles and rights with role/right and user/role links".to_string());

    Router::new()
        .route("/", get(redirect_to_docs))
        .merge(router)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", openapi))
}
