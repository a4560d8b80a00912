//! Folder store: CRUD plus the tree and sharing queries.

use chrono::Utc;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::{FolderId, OrderKey};
use taskhub_entity::folder::Folder;

use crate::document::Document;
use crate::memory::Collection;

impl Document for Folder {
    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Store for folder documents.
#[derive(Debug, Default)]
pub struct FolderStore {
    col: Collection<Folder>,
}

impl FolderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a folder by id.
    pub async fn get(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.col.get(id.into_uuid()))
    }

    /// Persist a new folder.
    pub async fn insert(&self, folder: Folder) -> AppResult<Folder> {
        Ok(self.col.insert(folder))
    }

    /// Apply a partial update. `None` when the folder is absent.
    pub async fn update(
        &self,
        id: FolderId,
        mutate: impl FnOnce(&mut Folder),
    ) -> AppResult<Option<Folder>> {
        Ok(self.col.update(id.into_uuid(), mutate))
    }

    /// Delete the folder record itself. Returns whether it existed.
    pub async fn remove(&self, id: FolderId) -> AppResult<bool> {
        Ok(self.col.remove(id.into_uuid()))
    }

    /// Direct children of a folder, ordering key ascending.
    pub async fn children_of(&self, parent: FolderId) -> AppResult<Vec<Folder>> {
        let mut children = self.col.filter(|f| f.parent == Some(parent));
        children.sort_by_key(|f| f.order);
        Ok(children)
    }

    /// Folders whose share list matches any of the given keys,
    /// ordering key ascending.
    pub async fn shared_with(&self, keys: &[Uuid]) -> AppResult<Vec<Folder>> {
        let mut folders = self
            .col
            .filter(|f| f.share_with.iter().any(|grant| grant.matches_any(keys)));
        folders.sort_by_key(|f| f.order);
        Ok(folders)
    }

    /// Assign a new ordering key. Returns whether the folder existed.
    pub async fn set_order(&self, id: FolderId, order: OrderKey) -> AppResult<bool> {
        Ok(self.col.update(id.into_uuid(), |f| f.order = order).is_some())
    }
}
