//! Time-tracking record handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use taskhub_core::types::{EpochMillis, RecordId, TaskId};
use taskhub_service::record::service::{CreateRecordRequest, UpdateRecordRequest};

use crate::error::ApiError;
use crate::dto::response::success;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query string of `GET /api/records`.
#[derive(Debug, Deserialize)]
pub struct FindRecordQuery {
    /// The task to look up records for.
    pub task: TaskId,
    /// A specific day; omitted means every record for the task.
    pub date: Option<EpochMillis>,
}

/// GET /api/records?task=...&date=...
pub async fn find_records(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FindRecordQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match query.date {
        Some(date) => {
            let record = state
                .record_service
                .find_record(&auth, query.task, date)
                .await?;
            Ok(success(record))
        }
        None => {
            let records = state
                .record_service
                .records_for_task(&auth, query.task)
                .await?;
            Ok(success(records))
        }
    }
}

/// GET /api/records/{id}
pub async fn get_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<RecordId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let record = state.record_service.get_record(&auth, id).await?;
    Ok(success(record))
}

/// POST /api/records
pub async fn create_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRecordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let record = state.record_service.create_record(&auth, req).await?;
    Ok(success(record))
}

/// PUT /api/records/{id}
pub async fn update_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<RecordId>,
    Json(req): Json<UpdateRecordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let record = state.record_service.update_record(&auth, id, req).await?;
    Ok(success(record))
}

/// DELETE /api/records/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<RecordId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let existed = state.record_service.delete_record(&auth, id).await?;
    Ok(success(existed))
}
