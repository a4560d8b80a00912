//! Account lifecycle handlers.

use axum::Json;
use axum::extract::State;
use validator::{Validate, ValidateEmail};

use taskhub_core::error::AppError;

use crate::error::ApiError;
use crate::dto::request::{
    CaptureEmailRequest, DeclineRequest, InviteRequest, LoginRequest, SignupRequest,
};
use crate::dto::response::success;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/capture-email
pub async fn capture_email(
    State(state): State<AppState>,
    Json(req): Json<CaptureEmailRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state.user_service.capture_email(&req.email).await?;
    Ok(success(user))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = state
        .user_service
        .signup(req.id, &req.name, &req.password)
        .await?;
    Ok(success(payload))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let payload = state.user_service.login(&req.email, &req.password).await?;
    Ok(success(payload))
}

/// POST /api/auth/invite
pub async fn invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<InviteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    for email in &req.emails {
        if !email.validate_email() {
            return Err(AppError::validation(format!("Invalid email: {email}")).into());
        }
    }

    let outcome = state
        .user_service
        .invite(&auth, &req.emails, &req.groups, req.role)
        .await?;
    Ok(success(outcome))
}

/// POST /api/auth/decline
pub async fn decline(
    State(state): State<AppState>,
    Json(req): Json<DeclineRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.user_service.decline(req.id).await?;
    Ok(success(user))
}
