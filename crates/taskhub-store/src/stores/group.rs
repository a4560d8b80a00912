//! Group store.

use chrono::Utc;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::{FolderId, GroupId, UserId};
use taskhub_entity::group::Group;

use crate::document::Document;
use crate::memory::Collection;

impl Document for Group {
    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Store for group documents.
#[derive(Debug, Default)]
pub struct GroupStore {
    col: Collection<Group>,
}

impl GroupStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a group by id.
    pub async fn get(&self, id: GroupId) -> AppResult<Option<Group>> {
        Ok(self.col.get(id.into_uuid()))
    }

    /// Every group on a team.
    pub async fn in_team(&self, team: FolderId) -> AppResult<Vec<Group>> {
        Ok(self.col.filter(|g| g.team == Some(team)))
    }

    /// Every group a user belongs to.
    pub async fn containing_user(&self, user: UserId) -> AppResult<Vec<Group>> {
        Ok(self.col.filter(|g| g.contains(user)))
    }

    /// Persist a new group.
    pub async fn insert(&self, group: Group) -> AppResult<Group> {
        Ok(self.col.insert(group))
    }

    /// Apply a partial update. `None` when the group is absent.
    pub async fn update(
        &self,
        id: GroupId,
        mutate: impl FnOnce(&mut Group),
    ) -> AppResult<Option<Group>> {
        Ok(self.col.update(id.into_uuid(), mutate))
    }

    /// Delete a group. Returns whether it existed.
    pub async fn remove(&self, id: GroupId) -> AppResult<bool> {
        Ok(self.col.remove(id.into_uuid()))
    }
}
