//! Application state shared across all handlers.

use std::sync::Arc;

use taskhub_auth::jwt::JwtDecoder;
use taskhub_core::config::AppConfig;
use taskhub_service::comment::CommentService;
use taskhub_service::folder::FolderService;
use taskhub_service::group::GroupService;
use taskhub_service::record::RecordService;
use taskhub_service::task::TaskService;
use taskhub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Folder service.
    pub folder_service: Arc<FolderService>,
    /// Task service.
    pub task_service: Arc<TaskService>,
    /// Comment and activity log service.
    pub comment_service: Arc<CommentService>,
    /// User service.
    pub user_service: Arc<UserService>,
    /// Group service.
    pub group_service: Arc<GroupService>,
    /// Record service.
    pub record_service: Arc<RecordService>,
}
