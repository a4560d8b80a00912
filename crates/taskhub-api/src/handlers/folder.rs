//! Folder and project handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use taskhub_core::types::FolderId;
use taskhub_service::folder::service::{
    CreateFolderRequest, CreateProjectRequest, UpdateFolderRequest,
};

use crate::error::ApiError;
use crate::dto::request::SortFoldersRequest;
use crate::dto::response::success;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query string of `GET /api/folders`.
#[derive(Debug, Deserialize)]
pub struct ListFoldersQuery {
    /// Restrict the listing to direct children of this folder.
    pub parent: Option<FolderId>,
}

/// GET /api/folders?parent=...
pub async fn get_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListFoldersQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folders = state.folder_service.get_folders(&auth, query.parent).await?;
    Ok(success(folders))
}

/// GET /api/folders/tree
pub async fn folder_tree(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let trees = state.folder_service.folder_tree(&auth).await?;
    Ok(success(trees))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(success(folder))
}

/// GET /api/folders/{id}/all-tasks
pub async fn all_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tasks = state.task_service.all_tasks(&auth, id).await?;
    Ok(success(tasks))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.folder_service.create_folder(&auth, req).await?;
    Ok(success(folder))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let project = state.folder_service.create_project(&auth, req).await?;
    Ok(success(project))
}

/// PUT /api/folders/sort
pub async fn sort_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SortFoldersRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updated = state
        .folder_service
        .sort_folders(&auth, &req.folders, &req.orders)
        .await?;
    Ok(success(updated))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
    Json(req): Json<UpdateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.folder_service.update_folder(&auth, id, req).await?;
    Ok(success(folder))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<FolderId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let existed = state.folder_service.delete_folder(&auth, id).await?;
    Ok(success(existed))
}
