//! Group CRUD and membership management.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{GroupId, UserId};
use taskhub_entity::group::Group;
use taskhub_entity::user::User;
use taskhub_store::{GroupStore, UserStore};

use crate::context::RequestContext;

/// Manages groups within the caller's team.
pub struct GroupService {
    groups: Arc<GroupStore>,
    users: Arc<UserStore>,
}

/// Request to create a new group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    /// Group name.
    pub name: String,
    /// Short initials shown on the avatar.
    #[serde(default)]
    pub initials: String,
    /// Avatar background color.
    pub avatar_color: Option<String>,
    /// Initial member user ids.
    #[serde(default)]
    pub users: Vec<UserId>,
}

/// Partial update of a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    /// New name.
    pub name: Option<String>,
    /// New initials.
    pub initials: Option<String>,
    /// New avatar color.
    pub avatar_color: Option<String>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(groups: Arc<GroupStore>, users: Arc<UserStore>) -> Self {
        Self { groups, users }
    }

    async fn current_user(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .get(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Unknown user"))
    }

    /// Gets a group by ID.
    pub async fn get_group(&self, _ctx: &RequestContext, id: GroupId) -> AppResult<Group> {
        self.groups
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Group not found"))
    }

    /// Every group on the caller's team.
    pub async fn get_groups(&self, ctx: &RequestContext) -> AppResult<Vec<Group>> {
        let user = self.current_user(ctx).await?;
        match user.team {
            Some(team) => self.groups.in_team(team).await,
            None => Ok(Vec::new()),
        }
    }

    /// Creates a group on the caller's team.
    pub async fn create_group(
        &self,
        ctx: &RequestContext,
        req: CreateGroupRequest,
    ) -> AppResult<Group> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Group name cannot be empty"));
        }

        let user = self.current_user(ctx).await?;
        let now = Utc::now();
        let group = self
            .groups
            .insert(Group {
                id: GroupId::new(),
                team: user.team,
                name: req.name,
                initials: req.initials,
                avatar_color: req.avatar_color,
                users: req.users,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(user_id = %ctx.user_id, group_id = %group.id, "Group created");
        Ok(group)
    }

    /// Applies a partial update.
    pub async fn update_group(
        &self,
        ctx: &RequestContext,
        id: GroupId,
        req: UpdateGroupRequest,
    ) -> AppResult<Group> {
        let updated = self
            .groups
            .update(id, |group| {
                if let Some(name) = req.name {
                    group.name = name;
                }
                if let Some(initials) = req.initials {
                    group.initials = initials;
                }
                if let Some(avatar_color) = req.avatar_color {
                    group.avatar_color = Some(avatar_color);
                }
            })
            .await?
            .ok_or_else(|| AppError::not_found("Group not found"))?;

        info!(user_id = %ctx.user_id, group_id = %id, "Group updated");
        Ok(updated)
    }

    /// Adds users to a group, skipping ones already present.
    pub async fn add_users(
        &self,
        ctx: &RequestContext,
        id: GroupId,
        users: &[UserId],
    ) -> AppResult<Group> {
        let updated = self
            .groups
            .update(id, |group| {
                for user in users {
                    if !group.users.contains(user) {
                        group.users.push(*user);
                    }
                }
            })
            .await?
            .ok_or_else(|| AppError::not_found("Group not found"))?;

        info!(user_id = %ctx.user_id, group_id = %id, "Users added to group");
        Ok(updated)
    }

    /// Removes users from a group.
    pub async fn remove_users(
        &self,
        ctx: &RequestContext,
        id: GroupId,
        users: &[UserId],
    ) -> AppResult<Group> {
        let updated = self
            .groups
            .update(id, |group| {
                group.users.retain(|user| !users.contains(user));
            })
            .await?
            .ok_or_else(|| AppError::not_found("Group not found"))?;

        info!(user_id = %ctx.user_id, group_id = %id, "Users removed from group");
        Ok(updated)
    }

    /// Deletes a group. Folders keep any grants pointing at the dead
    /// group id; they simply stop matching anyone's share keys.
    pub async fn delete_group(&self, ctx: &RequestContext, id: GroupId) -> AppResult<bool> {
        let removed = self.groups.remove(id).await?;
        info!(user_id = %ctx.user_id, group_id = %id, removed, "Group deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_core::types::FolderId;
    use taskhub_entity::user::{UserRole, UserStatus};

    async fn fixture() -> (GroupService, RequestContext) {
        let groups = Arc::new(GroupStore::new());
        let users = Arc::new(UserStore::new());
        let service = GroupService::new(Arc::clone(&groups), Arc::clone(&users));

        let mut user = User::pending("me@example.com".to_string(), UserRole::Member, None);
        user.team = Some(FolderId::new());
        user.status = UserStatus::Active;
        let user = users.insert(user).await.unwrap();
        let ctx = RequestContext::new(user.id, user.email.clone(), user.role);

        (service, ctx)
    }

    #[tokio::test]
    async fn test_membership_roundtrip() {
        let (service, ctx) = fixture().await;
        let group = service
            .create_group(
                &ctx,
                CreateGroupRequest {
                    name: "designers".to_string(),
                    initials: "DS".to_string(),
                    avatar_color: None,
                    users: Vec::new(),
                },
            )
            .await
            .unwrap();

        let a = UserId::new();
        let b = UserId::new();
        let group = service.add_users(&ctx, group.id, &[a, b, a]).await.unwrap();
        assert_eq!(group.users, vec![a, b]);

        let group = service.remove_users(&ctx, group.id, &[a]).await.unwrap();
        assert_eq!(group.users, vec![b]);
    }

    #[tokio::test]
    async fn test_groups_are_scoped_to_team() {
        let (service, ctx) = fixture().await;
        service
            .create_group(
                &ctx,
                CreateGroupRequest {
                    name: "devs".to_string(),
                    initials: String::new(),
                    avatar_color: None,
                    users: Vec::new(),
                },
            )
            .await
            .unwrap();

        assert_eq!(service.get_groups(&ctx).await.unwrap().len(), 1);
    }
}
