//! Request bodies carried by the API layer.
//!
//! Bodies for folder/task/group/record mutations deserialize straight
//! into the service-level request structs; the types here are the ones
//! that need input validation or carry transport-only shape.

use serde::{Deserialize, Serialize};
use validator::Validate;

use taskhub_core::types::{FolderId, GroupId, TaskId, UserId};
use taskhub_entity::share::TargetRef;
use taskhub_entity::user::UserRole;

/// Body of `POST /api/auth/capture-email`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CaptureEmailRequest {
    /// Address to register.
    #[validate(email)]
    pub email: String,
}

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// The pending user completing signup.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Plaintext password, hashed server-side.
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(email)]
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Body of `POST /api/auth/invite`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteRequest {
    /// Addresses to invite.
    pub emails: Vec<String>,
    /// Groups the new users join.
    #[serde(default)]
    pub groups: Vec<GroupId>,
    /// Role assigned to every invited user.
    pub role: UserRole,
}

/// Body of `POST /api/auth/decline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclineRequest {
    /// The pending user declining their invitation.
    pub id: UserId,
}

/// Body of `PUT /api/folders/sort`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortFoldersRequest {
    /// Folders to reorder.
    pub folders: Vec<FolderId>,
    /// New ordering keys, parallel to `folders`.
    pub orders: Vec<i64>,
}

/// Body of `PUT /api/tasks/sort`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortTasksRequest {
    /// Tasks to reorder.
    pub tasks: Vec<TaskId>,
    /// New ordering keys, parallel to `tasks`.
    pub orders: Vec<i64>,
}

/// Body of `POST /api/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    /// What the comment is attached to.
    pub target: TargetRef,
    /// Comment body.
    pub body: String,
}

/// Body of group membership changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMembersRequest {
    /// Users to add or remove.
    pub users: Vec<UserId>,
}
