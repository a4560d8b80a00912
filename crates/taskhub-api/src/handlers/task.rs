//! Task handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use taskhub_core::types::{FolderId, TaskId};
use taskhub_service::task::service::{CreateTaskRequest, UpdateTaskRequest};

use crate::error::ApiError;
use crate::dto::request::SortTasksRequest;
use crate::dto::response::success;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query string of `GET /api/tasks`.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// List subtasks of this task.
    pub parent: Option<TaskId>,
    /// List tasks directly in this folder.
    pub folder: Option<FolderId>,
}

/// GET /api/tasks?parent=...&folder=...
pub async fn get_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tasks = state
        .task_service
        .get_tasks(&auth, query.parent, query.folder)
        .await?;
    Ok(success(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let task = state.task_service.get_task(&auth, id).await?;
    Ok(success(task))
}

/// GET /api/tasks/{id}/tree
pub async fn task_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tree = state.task_service.task_tree(&auth, id).await?;
    Ok(success(tree))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let task = state.task_service.create_task(&auth, req).await?;
    Ok(success(task))
}

/// PUT /api/tasks/sort
pub async fn sort_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SortTasksRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updated = state
        .task_service
        .sort_tasks(&auth, &req.tasks, &req.orders)
        .await?;
    Ok(success(updated))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let task = state.task_service.update_task(&auth, id, req).await?;
    Ok(success(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let existed = state.task_service.delete_task(&auth, id).await?;
    Ok(success(existed))
}
