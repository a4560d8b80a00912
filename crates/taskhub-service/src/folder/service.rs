//! Folder CRUD, reordering, tree expansion, and cascading deletion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{EpochMillis, FolderId, OrderKey, OrderKeyGenerator, UserId};
use taskhub_entity::folder::{
    CreateFolder, Folder, FolderKind, FolderNode, ProjectFields, ProjectStatus,
};
use taskhub_entity::share::ShareGrant;
use taskhub_entity::user::User;
use taskhub_store::{FolderStore, UserStore};

use crate::context::RequestContext;
use crate::hierarchy::{Cascade, TreeBuilder};
use crate::scope::{AccessScope, share_policy};

/// Manages the folder forest.
pub struct FolderService {
    folders: Arc<FolderStore>,
    users: Arc<UserStore>,
    scope: Arc<AccessScope>,
    tree: Arc<TreeBuilder>,
    cascade: Arc<Cascade>,
    order_keys: Arc<OrderKeyGenerator>,
}

/// Request to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Parent folder (None for a new root).
    pub parent: Option<FolderId>,
    /// Folder name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Explicit sharing grants.
    #[serde(default)]
    pub share_with: Vec<ShareGrant>,
}

/// Request to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Parent folder (None for a new root).
    pub parent: Option<FolderId>,
    /// Project name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Explicit sharing grants.
    #[serde(default)]
    pub share_with: Vec<ShareGrant>,
    /// Users responsible for the project.
    #[serde(default)]
    pub owners: Vec<UserId>,
    /// Planned start.
    pub start_date: Option<EpochMillis>,
    /// Planned finish.
    pub finish_date: Option<EpochMillis>,
}

/// Partial update of a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolderRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replacement grant list.
    pub share_with: Option<Vec<ShareGrant>>,
    /// Slack webhook for comment notifications.
    pub slack_webhook: Option<String>,
    /// New project owners (projects only).
    pub owners: Option<Vec<UserId>>,
    /// New planned start (projects only).
    pub start_date: Option<EpochMillis>,
    /// New planned finish (projects only).
    pub finish_date: Option<EpochMillis>,
    /// New health status (projects only).
    pub status: Option<ProjectStatus>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<FolderStore>,
        users: Arc<UserStore>,
        scope: Arc<AccessScope>,
        tree: Arc<TreeBuilder>,
        cascade: Arc<Cascade>,
        order_keys: Arc<OrderKeyGenerator>,
    ) -> Self {
        Self {
            folders,
            users,
            scope,
            tree,
            cascade,
            order_keys,
        }
    }

    async fn current_user(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .get(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Unknown user"))
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, _ctx: &RequestContext, id: FolderId) -> AppResult<Folder> {
        self.folders
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Lists folders the caller can see: one level below `parent`, or
    /// every directly-shared folder when no parent is given.
    pub async fn get_folders(
        &self,
        ctx: &RequestContext,
        parent: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        let user = self.current_user(ctx).await?;
        self.scope.visible_folders(&user, parent).await
    }

    /// Expands every visible sharing point into a full tree.
    pub async fn folder_tree(&self, ctx: &RequestContext) -> AppResult<Vec<FolderNode>> {
        let user = self.current_user(ctx).await?;
        let seeds = self.scope.visible_folders(&user, None).await?;
        let roots: Vec<FolderId> = seeds.iter().map(|f| f.id).collect();
        self.tree.folder_forest(&roots).await
    }

    /// Creates a new folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        self.create(ctx, FolderKind::Folder, req).await
    }

    /// Creates a new project. Projects start with a `Green` status.
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        req: CreateProjectRequest,
    ) -> AppResult<Folder> {
        let kind = FolderKind::Project(ProjectFields {
            owners: req.owners,
            start_date: req.start_date,
            finish_date: req.finish_date,
            status: ProjectStatus::Green,
        });
        self.create(
            ctx,
            kind,
            CreateFolderRequest {
                parent: req.parent,
                name: req.name,
                description: req.description,
                share_with: req.share_with,
            },
        )
        .await
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        kind: FolderKind,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        if let Some(parent) = req.parent {
            self.folders
                .get(parent)
                .await?
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
        }

        let user = self.current_user(ctx).await?;
        let share_with = share_policy(&user, req.parent, &req.share_with);

        // A root without grants would be unreachable for everyone.
        if req.parent.is_none() && share_with.is_empty() {
            return Err(AppError::validation(
                "A top-level folder needs at least one sharing grant",
            ));
        }

        let folder = self
            .folders
            .insert(Folder::new(CreateFolder {
                kind,
                name: req.name,
                description: req.description,
                parent: req.parent,
                share_with,
                order: self.order_keys.next(),
            }))
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent = ?folder.parent,
            "Folder created"
        );

        Ok(folder)
    }

    /// Applies a partial update. Project-only fields are ignored on
    /// plain folders.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        id: FolderId,
        req: UpdateFolderRequest,
    ) -> AppResult<Folder> {
        let updated = self
            .folders
            .update(id, |folder| {
                if let Some(name) = req.name {
                    folder.name = name;
                }
                if let Some(description) = req.description {
                    folder.description = description;
                }
                if let Some(share_with) = req.share_with {
                    folder.share_with = share_with;
                }
                if let Some(webhook) = req.slack_webhook {
                    folder.slack_webhook = Some(webhook);
                }
                if let FolderKind::Project(fields) = &mut folder.kind {
                    if let Some(owners) = req.owners {
                        fields.owners = owners;
                    }
                    if let Some(start_date) = req.start_date {
                        fields.start_date = Some(start_date);
                    }
                    if let Some(finish_date) = req.finish_date {
                        fields.finish_date = Some(finish_date);
                    }
                    if let Some(status) = req.status {
                        fields.status = status;
                    }
                }
            })
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(user_id = %ctx.user_id, folder_id = %id, "Folder updated");
        Ok(updated)
    }

    /// Reassigns ordering keys pairwise. Best-effort: each update is
    /// independent, a missing folder is skipped, and a partial failure
    /// leaves the rest reordered. Returns how many were updated.
    pub async fn sort_folders(
        &self,
        ctx: &RequestContext,
        ids: &[FolderId],
        orders: &[i64],
    ) -> AppResult<usize> {
        if ids.len() != orders.len() {
            return Err(AppError::validation(
                "ids and orders must have the same length",
            ));
        }

        let mut updated = 0;
        for (id, order) in ids.iter().zip(orders) {
            if self.folders.set_order(*id, OrderKey::from_raw(*order)).await? {
                updated += 1;
            } else {
                warn!(folder_id = %id, "Skipping reorder of missing folder");
            }
        }

        info!(user_id = %ctx.user_id, updated, "Folders reordered");
        Ok(updated)
    }

    /// Deletes a folder and its entire subtree. Returns whether the
    /// folder existed; re-deleting is a successful no-op.
    pub async fn delete_folder(&self, ctx: &RequestContext, id: FolderId) -> AppResult<bool> {
        let existed = self.cascade.delete_folder(id).await?;
        info!(user_id = %ctx.user_id, folder_id = %id, existed, "Folder deleted");
        Ok(existed)
    }
}
