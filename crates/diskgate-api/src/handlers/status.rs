use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use diskgate_core::models::DiskStatus;
use std::sync::Arc;

/// Aggregated status of the backing store.
#[utoipa::path(
    get,
    path = "/status.json",
    tag = "status",
    responses(
        (status = 200, description = "Disk status", body = DiskStatus),
        (status = 500, description = "Storage backend failure", body = ErrorResponse)
    )
)]
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DiskStatus>, HttpAppError> {
    let status = state.disk.status().await?;
    Ok(Json(status))
}
