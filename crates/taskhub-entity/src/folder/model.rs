//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{EpochMillis, FolderId, OrderKey, UserId};

use super::status::ProjectStatus;
use crate::share::ShareGrant;

/// Extra fields carried by the `Project` folder variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFields {
    /// Users responsible for the project.
    pub owners: Vec<UserId>,
    /// Planned start.
    pub start_date: Option<EpochMillis>,
    /// Planned finish.
    pub finish_date: Option<EpochMillis>,
    /// Traffic-light health status.
    pub status: ProjectStatus,
}

/// Folder specialization, tagged into the stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FolderKind {
    /// A plain container folder.
    Folder,
    /// A project: a folder with owners, dates, and a health status.
    Project(ProjectFields),
    /// A team root. Every user's `team` field points at one of these.
    Team,
}

/// A container node in the folder tree.
///
/// Tree membership is expressed solely by the child's `parent` pointer;
/// children are rebuilt by query, ordered by `order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Specialization (plain folder, project, or team root).
    #[serde(flatten)]
    pub kind: FolderKind,
    /// Folder name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Parent folder (None for roots).
    pub parent: Option<FolderId>,
    /// Visibility grants. Roots need at least one to be discoverable;
    /// nested folders are reached through their parent instead.
    pub share_with: Vec<ShareGrant>,
    /// Position among siblings.
    pub order: OrderKey,
    /// Slack webhook receiving comment notifications for this tree.
    /// Only consulted on root folders.
    pub slack_webhook: Option<String>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this folder is a project.
    pub fn is_project(&self) -> bool {
        matches!(self.kind, FolderKind::Project(_))
    }

    /// Check if this folder is a team root.
    pub fn is_team(&self) -> bool {
        matches!(self.kind, FolderKind::Team)
    }

    /// Project fields, when this folder is a project.
    pub fn project(&self) -> Option<&ProjectFields> {
        match &self.kind {
            FolderKind::Project(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Specialization of the new folder.
    pub kind: FolderKind,
    /// Folder name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Parent folder (None for roots).
    pub parent: Option<FolderId>,
    /// Visibility grants, already resolved by the share policy.
    pub share_with: Vec<ShareGrant>,
    /// Position among siblings.
    pub order: OrderKey,
}

impl Folder {
    /// Materialize a new folder document.
    pub fn new(data: CreateFolder) -> Self {
        let now = Utc::now();
        Self {
            id: FolderId::new(),
            kind: data.kind,
            name: data.name,
            description: data.description,
            parent: data.parent,
            share_with: data.share_with,
            order: data.order,
            slack_webhook: None,
            created_at: now,
            updated_at: now,
        }
    }
}
