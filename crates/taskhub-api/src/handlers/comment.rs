//! Comment and activity log handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use taskhub_core::types::LogId;
use taskhub_entity::share::{TargetKind, TargetRef};

use crate::error::ApiError;
use crate::dto::request::CreateCommentRequest;
use crate::dto::response::success;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query string of `GET /api/comments`.
#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    /// Target collection.
    pub kind: TargetKind,
    /// Target id.
    pub target: Uuid,
}

/// Query string of `GET /api/logs`.
#[derive(Debug, Deserialize)]
pub struct ListLogsQuery {
    /// Maximum number of entries (newest first).
    pub limit: Option<usize>,
}

/// GET /api/comments?kind=task&target=...
pub async fn get_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListCommentsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let target = TargetRef {
        kind: query.kind,
        item: query.target,
    };
    let comments = state.comment_service.get_comments(&auth, target).await?;
    Ok(success(comments))
}

/// GET /api/logs?limit=...
pub async fn get_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListLogsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let logs = state
        .comment_service
        .get_logs(&auth, query.limit.unwrap_or(50))
        .await?;
    Ok(success(logs))
}

/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCommentRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let comment = state
        .comment_service
        .create_comment(&auth, req.target, req.body)
        .await?;
    Ok(success(comment))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<LogId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let existed = state.comment_service.delete_comment(&auth, id).await?;
    Ok(success(existed))
}
