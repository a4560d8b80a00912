//! Cascading deletion over the folder and task forests.
//!
//! Children are removed strictly before their parent record so an
//! interrupted cascade never leaves a task pointing at a deleted
//! folder. Every step tolerates "already gone": re-invoking a cascade
//! after a crash completes cleanly.

use std::collections::HashSet;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use tracing::{debug, warn};

use taskhub_core::result::AppResult;
use taskhub_core::types::{FolderId, TaskId};
use taskhub_entity::share::TargetRef;
use taskhub_store::{FolderStore, LogStore, TaskStore};

/// Deletes whole subtrees: folders with their tasks, tasks with their
/// subtasks and comments.
pub struct Cascade {
    folders: Arc<FolderStore>,
    tasks: Arc<TaskStore>,
    logs: Arc<LogStore>,
}

impl Cascade {
    /// Creates a new cascade.
    pub fn new(folders: Arc<FolderStore>, tasks: Arc<TaskStore>, logs: Arc<LogStore>) -> Self {
        Self {
            folders,
            tasks,
            logs,
        }
    }

    /// Delete a folder, its tasks, and every descendant folder.
    ///
    /// Returns whether the folder record existed; deleting an
    /// already-deleted id is a no-op, not an error.
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<bool> {
        let existed = self.folders.get(id).await?.is_some();
        self.delete_folder_subtree(id, HashSet::new()).await?;
        debug!(folder_id = %id, existed, "Folder cascade complete");
        Ok(existed)
    }

    /// Delete a task, its comments, and every descendant subtask.
    ///
    /// Same idempotency contract as [`Self::delete_folder`].
    pub async fn delete_task(&self, id: TaskId) -> AppResult<bool> {
        let existed = self.tasks.get(id).await?.is_some();
        self.delete_task_subtree(id, HashSet::new()).await?;
        debug!(task_id = %id, existed, "Task cascade complete");
        Ok(existed)
    }

    fn delete_folder_subtree(
        &self,
        id: FolderId,
        path: HashSet<FolderId>,
    ) -> BoxFuture<'_, AppResult<()>> {
        async move {
            if path.contains(&id) {
                warn!(folder_id = %id, "Folder revisited during cascade, skipping");
                return Ok(());
            }
            let mut path = path;
            path.insert(id);

            // Tasks referencing this folder go first so an interruption
            // never strands a task pointing at a deleted folder.
            let tasks = self.tasks.in_folder(id).await?;
            try_join_all(
                tasks
                    .iter()
                    .map(|task| self.delete_task_subtree(task.id, HashSet::new())),
            )
            .await?;

            let children = self.folders.children_of(id).await?;
            try_join_all(
                children
                    .iter()
                    .map(|child| self.delete_folder_subtree(child.id, path.clone())),
            )
            .await?;

            self.folders.remove(id).await?;
            Ok(())
        }
        .boxed()
    }

    fn delete_task_subtree(
        &self,
        id: TaskId,
        path: HashSet<TaskId>,
    ) -> BoxFuture<'_, AppResult<()>> {
        async move {
            if path.contains(&id) {
                warn!(task_id = %id, "Task revisited during cascade, skipping");
                return Ok(());
            }
            let mut path = path;
            path.insert(id);

            self.logs.remove_by_target(TargetRef::task(id)).await?;

            let children = self.tasks.children_of(id).await?;
            try_join_all(
                children
                    .iter()
                    .map(|child| self.delete_task_subtree(child.id, path.clone())),
            )
            .await?;

            self.tasks.remove(id).await?;
            Ok(())
        }
        .boxed()
    }
}
