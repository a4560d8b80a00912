//! Recursive tree assembly over the folder and task forests.
//!
//! Sibling subtrees are fetched with unordered fan-out and joined, so
//! latency is bounded by tree depth rather than breadth. Every walk
//! carries a visited set: creation logic keeps the forests acyclic, but
//! a traversal must terminate on malformed data anyway.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use tracing::warn;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{FolderId, TaskId};
use taskhub_entity::folder::{Folder, FolderNode};
use taskhub_entity::task::{Task, TaskNode};
use taskhub_store::{FolderStore, TaskStore};

/// Assembles folder and task trees from parent-pointer queries.
pub struct TreeBuilder {
    folders: Arc<FolderStore>,
    tasks: Arc<TaskStore>,
}

impl TreeBuilder {
    /// Creates a new tree builder.
    pub fn new(folders: Arc<FolderStore>, tasks: Arc<TaskStore>) -> Self {
        Self { folders, tasks }
    }

    /// Expand a folder into its full subtree.
    pub async fn folder_tree(&self, root: FolderId) -> AppResult<FolderNode> {
        self.expand_folder(root, HashSet::new())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {root} not found")))
    }

    /// Expand several roots concurrently, skipping any that vanished
    /// since they were listed.
    pub async fn folder_forest(&self, roots: &[FolderId]) -> AppResult<Vec<FolderNode>> {
        let trees = try_join_all(
            roots
                .iter()
                .map(|root| self.expand_folder(*root, HashSet::new())),
        )
        .await?;
        Ok(trees.into_iter().flatten().collect())
    }

    fn expand_folder(
        &self,
        id: FolderId,
        path: HashSet<FolderId>,
    ) -> BoxFuture<'_, AppResult<Option<FolderNode>>> {
        async move {
            if path.contains(&id) {
                warn!(folder_id = %id, "Folder revisited on its own path, skipping");
                return Ok(None);
            }
            let Some(folder) = self.folders.get(id).await? else {
                return Ok(None);
            };

            let mut path = path;
            path.insert(id);

            let children = self.folders.children_of(id).await?;
            let subtrees = try_join_all(
                children
                    .iter()
                    .map(|child| self.expand_folder(child.id, path.clone())),
            )
            .await?;

            let tasks = self.tasks.in_folder(id).await?;

            Ok(Some(FolderNode {
                id: folder.id,
                name: folder.name,
                tasks: tasks.iter().map(|t| t.id).collect(),
                share_with: folder.share_with,
                subfolders: subtrees.into_iter().flatten().collect(),
            }))
        }
        .boxed()
    }

    /// Expand a task into its full subtree, with inherited folder
    /// context on every node.
    pub async fn task_tree(&self, root: TaskId) -> AppResult<TaskNode> {
        self.expand_task(root, HashSet::new())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task {root} not found")))
    }

    fn expand_task(
        &self,
        id: TaskId,
        path: HashSet<TaskId>,
    ) -> BoxFuture<'_, AppResult<Option<TaskNode>>> {
        async move {
            if path.contains(&id) {
                warn!(task_id = %id, "Task revisited on its own path, skipping");
                return Ok(None);
            }
            let Some(task) = self.tasks.get(id).await? else {
                return Ok(None);
            };

            let inherited_folders = self.inherited_folders(&task).await?;

            let mut path = path;
            path.insert(id);

            let children = self.tasks.children_of(id).await?;
            let subtrees = try_join_all(
                children
                    .iter()
                    .map(|child| self.expand_task(child.id, path.clone())),
            )
            .await?;

            Ok(Some(TaskNode {
                id: task.id,
                name: task.name,
                status: task.status,
                importance: task.importance,
                assignees: task.assignees,
                inherited_folders,
                subtasks: subtrees.into_iter().flatten().collect(),
            }))
        }
        .boxed()
    }

    /// The task's own folders merged with every ancestor task's folders,
    /// deduplicated by folder id, first-seen order.
    ///
    /// The walk is bounded by actual chain depth. A dangling parent
    /// pointer (possible mid-cascade) ends the chain; a revisited task
    /// id is a hierarchy error.
    pub async fn inherited_folders(&self, task: &Task) -> AppResult<Vec<FolderId>> {
        let mut seen_tasks = HashSet::from([task.id]);
        let mut seen_folders = HashSet::new();
        let mut folders = Vec::new();

        for folder in &task.folders {
            if seen_folders.insert(*folder) {
                folders.push(*folder);
            }
        }

        let mut cursor = task.parent;
        while let Some(parent_id) = cursor {
            if !seen_tasks.insert(parent_id) {
                return Err(AppError::hierarchy(format!(
                    "Cyclic parent chain at task {parent_id}"
                )));
            }
            let Some(parent) = self.tasks.get(parent_id).await? else {
                break;
            };
            for folder in &parent.folders {
                if seen_folders.insert(*folder) {
                    folders.push(*folder);
                }
            }
            cursor = parent.parent;
        }

        Ok(folders)
    }

    /// Walk parent pointers up to the top-level folder.
    ///
    /// A folder that is already a root short-circuits without touching
    /// the store.
    pub async fn root_folder(&self, folder: &Folder) -> AppResult<Folder> {
        if folder.is_root() {
            return Ok(folder.clone());
        }

        let mut seen = HashSet::from([folder.id]);
        let mut current = folder.clone();
        while let Some(parent_id) = current.parent {
            if !seen.insert(parent_id) {
                return Err(AppError::hierarchy(format!(
                    "Cyclic parent chain at folder {parent_id}"
                )));
            }
            current = self.folders.get(parent_id).await?.ok_or_else(|| {
                AppError::hierarchy(format!("Parent chain references missing folder {parent_id}"))
            })?;
        }
        Ok(current)
    }

    /// Walk parent pointers up to the top-level task.
    pub async fn root_task(&self, task: &Task) -> AppResult<Task> {
        if task.is_top_level() {
            return Ok(task.clone());
        }

        let mut seen = HashSet::from([task.id]);
        let mut current = task.clone();
        while let Some(parent_id) = current.parent {
            if !seen.insert(parent_id) {
                return Err(AppError::hierarchy(format!(
                    "Cyclic parent chain at task {parent_id}"
                )));
            }
            current = self.tasks.get(parent_id).await?.ok_or_else(|| {
                AppError::hierarchy(format!("Parent chain references missing task {parent_id}"))
            })?;
        }
        Ok(current)
    }

    /// Flatten the subfolder tree below a folder into an ordered id
    /// list, the folder itself excluded.
    pub async fn descendant_folder_ids(&self, folder: FolderId) -> AppResult<Vec<FolderId>> {
        let mut ids = Vec::new();
        let mut seen = HashSet::from([folder]);
        let mut queue = VecDeque::from([folder]);

        while let Some(current) = queue.pop_front() {
            for child in self.folders.children_of(current).await? {
                if seen.insert(child.id) {
                    ids.push(child.id);
                    queue.push_back(child.id);
                }
            }
        }
        Ok(ids)
    }
}
