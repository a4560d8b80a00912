//! Task store: CRUD plus subtask and folder-membership queries.

use chrono::Utc;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::{FolderId, OrderKey, TaskId};
use taskhub_entity::task::Task;

use crate::document::Document;
use crate::memory::Collection;

impl Document for Task {
    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Store for task documents.
#[derive(Debug, Default)]
pub struct TaskStore {
    col: Collection<Task>,
}

impl TaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a task by id.
    pub async fn get(&self, id: TaskId) -> AppResult<Option<Task>> {
        Ok(self.col.get(id.into_uuid()))
    }

    /// Persist a new task.
    pub async fn insert(&self, task: Task) -> AppResult<Task> {
        Ok(self.col.insert(task))
    }

    /// Apply a partial update. `None` when the task is absent.
    pub async fn update(
        &self,
        id: TaskId,
        mutate: impl FnOnce(&mut Task),
    ) -> AppResult<Option<Task>> {
        Ok(self.col.update(id.into_uuid(), mutate))
    }

    /// Delete the task record itself. Returns whether it existed.
    pub async fn remove(&self, id: TaskId) -> AppResult<bool> {
        Ok(self.col.remove(id.into_uuid()))
    }

    /// Direct subtasks of a task, ordering key ascending.
    pub async fn children_of(&self, parent: TaskId) -> AppResult<Vec<Task>> {
        let mut children = self.col.filter(|t| t.parent == Some(parent));
        children.sort_by_key(|t| t.order);
        Ok(children)
    }

    /// Tasks directly referencing a folder, ordering key ascending.
    pub async fn in_folder(&self, folder: FolderId) -> AppResult<Vec<Task>> {
        let mut tasks = self.col.filter(|t| t.folders.contains(&folder));
        tasks.sort_by_key(|t| t.order);
        Ok(tasks)
    }

    /// Tasks directly referencing any of the folders, ordering key
    /// ascending, each task once.
    pub async fn in_folders(&self, folders: &[FolderId]) -> AppResult<Vec<Task>> {
        let mut tasks = self
            .col
            .filter(|t| t.folders.iter().any(|f| folders.contains(f)));
        tasks.sort_by_key(|t| t.order);
        Ok(tasks)
    }

    /// Assign a new ordering key. Returns whether the task existed.
    pub async fn set_order(&self, id: TaskId, order: OrderKey) -> AppResult<bool> {
        Ok(self.col.update(id.into_uuid(), |t| t.order = order).is_some())
    }
}
