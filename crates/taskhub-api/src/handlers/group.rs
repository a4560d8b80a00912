//! Group handlers.

use axum::Json;
use axum::extract::{Path, State};

use taskhub_core::types::GroupId;
use taskhub_service::group::service::{CreateGroupRequest, UpdateGroupRequest};

use crate::error::ApiError;
use crate::dto::request::GroupMembersRequest;
use crate::dto::response::success;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/groups
pub async fn get_groups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let groups = state.group_service.get_groups(&auth).await?;
    Ok(success(groups))
}

/// GET /api/groups/{id}
pub async fn get_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<GroupId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group = state.group_service.get_group(&auth, id).await?;
    Ok(success(group))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group = state.group_service.create_group(&auth, req).await?;
    Ok(success(group))
}

/// PUT /api/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<GroupId>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group = state.group_service.update_group(&auth, id, req).await?;
    Ok(success(group))
}

/// POST /api/groups/{id}/users
pub async fn add_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<GroupId>,
    Json(req): Json<GroupMembersRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group = state.group_service.add_users(&auth, id, &req.users).await?;
    Ok(success(group))
}

/// DELETE /api/groups/{id}/users
pub async fn remove_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<GroupId>,
    Json(req): Json<GroupMembersRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group = state
        .group_service
        .remove_users(&auth, id, &req.users)
        .await?;
    Ok(success(group))
}

/// DELETE /api/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<GroupId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let existed = state.group_service.delete_group(&auth, id).await?;
    Ok(success(existed))
}
