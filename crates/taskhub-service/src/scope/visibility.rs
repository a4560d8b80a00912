//! Permission-scoped folder retrieval.

use std::sync::Arc;

use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::FolderId;
use taskhub_entity::folder::Folder;
use taskhub_entity::user::User;
use taskhub_store::{FolderStore, GroupStore};

/// Computes which folders a user may see.
pub struct AccessScope {
    folders: Arc<FolderStore>,
    groups: Arc<GroupStore>,
}

impl AccessScope {
    /// Creates a new access scope.
    pub fn new(folders: Arc<FolderStore>, groups: Arc<GroupStore>) -> Self {
        Self { folders, groups }
    }

    /// The sharing-grant key set for a user: their own id, every group
    /// they belong to, and — unless their role is restricted — their
    /// team id.
    pub async fn share_keys(&self, user: &User) -> AppResult<Vec<Uuid>> {
        let mut keys = vec![user.id.into_uuid()];
        for group in self.groups.containing_user(user.id).await? {
            keys.push(group.id.into_uuid());
        }
        if !user.role.is_restricted() {
            if let Some(team) = user.team {
                keys.push(team.into_uuid());
            }
        }
        Ok(keys)
    }

    /// Folders the user can see.
    ///
    /// With a parent: the parent's direct children, one level, ordering
    /// key ascending — visibility there is inherited by reachability.
    /// Without: every directly-shared folder; each disjoint sharing
    /// point is its own tree root on the client.
    pub async fn visible_folders(
        &self,
        user: &User,
        parent: Option<FolderId>,
    ) -> AppResult<Vec<Folder>> {
        match parent {
            Some(parent) => self.folders.children_of(parent).await,
            None => {
                let keys = self.share_keys(user).await?;
                self.folders.shared_with(&keys).await
            }
        }
    }
}
