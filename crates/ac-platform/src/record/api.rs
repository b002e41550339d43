//! Records API

use axum::{extract::State, Json};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::record::entity::Record;
use crate::record::service::RecordService;
use crate::shared::error::PlatformError;

#[derive(Clone)]
pub struct RecordsState {
    pub record_service: RecordService,
}

/// List records
#[utoipa::path(
    get,
    path = "/records/",
    tag = "records",
    responses(
        (status = 200, description = "All records", body = Vec<Record>)
    )
)]
pub async fn list_records(State(state): State<RecordsState>) -> Result<Json<Vec<Record>>, PlatformError> {
    Ok(Json(state.record_service.get_all_records().await?))
}

pub fn records_router(state: RecordsState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_records))
        .with_state(state)
}
