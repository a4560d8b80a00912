//! User profile handlers.

use axum::Json;
use axum::extract::{Path, State};

use taskhub_core::types::UserId;
use taskhub_service::user::service::UpdateUserRequest;

use crate::error::ApiError;
use crate::dto::response::success;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users
pub async fn get_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let users = state.user_service.get_users(&auth).await?;
    Ok(success(users))
}

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.user_service.get_user(&auth, None).await?;
    Ok(success(user))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.user_service.get_user(&auth, Some(id)).await?;
    Ok(success(user))
}

/// PUT /api/users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.user_service.update_user(&auth, req).await?;
    Ok(success(user))
}
