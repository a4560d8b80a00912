//! Task CRUD, reordering, subtree queries, and cascading deletion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{EpochMillis, FolderId, OrderKey, OrderKeyGenerator, TaskId, UserId};
use taskhub_entity::log::{LogEntry, LogEvent};
use taskhub_entity::share::TargetRef;
use taskhub_entity::task::{CreateTask, Task, TaskImportance, TaskNode, TaskStatus};
use taskhub_store::{FolderStore, LogStore, TaskStore};

use crate::context::RequestContext;
use crate::hierarchy::{Cascade, TreeBuilder};

/// Manages the task forest.
pub struct TaskService {
    tasks: Arc<TaskStore>,
    folders: Arc<FolderStore>,
    logs: Arc<LogStore>,
    tree: Arc<TreeBuilder>,
    cascade: Arc<Cascade>,
    order_keys: Arc<OrderKeyGenerator>,
}

/// Request to create a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Task name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Parent task; the new task becomes its subtask.
    pub parent: Option<TaskId>,
    /// Folder the task belongs to. Tasks under a parent usually leave
    /// this empty and inherit folder context from their ancestors.
    pub folder: Option<FolderId>,
    /// Initial assignees.
    #[serde(default)]
    pub assignees: Vec<UserId>,
    /// Planned start.
    pub start_date: Option<EpochMillis>,
    /// Planned finish.
    pub finish_date: Option<EpochMillis>,
    /// Importance level.
    #[serde(default)]
    pub importance: TaskImportance,
}

/// Partial update of a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replacement assignee list.
    pub assignees: Option<Vec<UserId>>,
    /// Replacement folder list.
    pub folders: Option<Vec<FolderId>>,
    /// New planned start.
    pub start_date: Option<EpochMillis>,
    /// New planned finish.
    pub finish_date: Option<EpochMillis>,
    /// New importance.
    pub importance: Option<TaskImportance>,
    /// New status.
    pub status: Option<TaskStatus>,
}

impl TaskService {
    /// Creates a new task service.
    pub fn new(
        tasks: Arc<TaskStore>,
        folders: Arc<FolderStore>,
        logs: Arc<LogStore>,
        tree: Arc<TreeBuilder>,
        cascade: Arc<Cascade>,
        order_keys: Arc<OrderKeyGenerator>,
    ) -> Self {
        Self {
            tasks,
            folders,
            logs,
            tree,
            cascade,
            order_keys,
        }
    }

    /// Gets a task by ID.
    pub async fn get_task(&self, _ctx: &RequestContext, id: TaskId) -> AppResult<Task> {
        self.tasks
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))
    }

    /// Lists one level of tasks: subtasks of `parent`, or tasks
    /// directly referencing `folder`.
    pub async fn get_tasks(
        &self,
        _ctx: &RequestContext,
        parent: Option<TaskId>,
        folder: Option<FolderId>,
    ) -> AppResult<Vec<Task>> {
        match (parent, folder) {
            (Some(parent), _) => self.tasks.children_of(parent).await,
            (None, Some(folder)) => self.tasks.in_folder(folder).await,
            (None, None) => Err(AppError::validation(
                "Either a parent task or a folder is required",
            )),
        }
    }

    /// Every task under a folder, descendant folders included.
    pub async fn all_tasks(&self, _ctx: &RequestContext, folder: FolderId) -> AppResult<Vec<Task>> {
        let mut folders = vec![folder];
        folders.extend(self.tree.descendant_folder_ids(folder).await?);
        self.tasks.in_folders(&folders).await
    }

    /// Expands a task into its subtree with inherited folder context.
    pub async fn task_tree(&self, _ctx: &RequestContext, id: TaskId) -> AppResult<TaskNode> {
        self.tree.task_tree(id).await
    }

    /// Creates a new task and records a `Created` audit entry.
    pub async fn create_task(
        &self,
        ctx: &RequestContext,
        req: CreateTaskRequest,
    ) -> AppResult<Task> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Task name cannot be empty"));
        }

        if let Some(parent) = req.parent {
            self.tasks
                .get(parent)
                .await?
                .ok_or_else(|| AppError::not_found("Parent task not found"))?;
        }
        if let Some(folder) = req.folder {
            self.folders
                .get(folder)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
        }

        let task = self
            .tasks
            .insert(Task::new(CreateTask {
                name: req.name,
                description: req.description,
                parent: req.parent,
                folders: req.folder.into_iter().collect(),
                assignees: req.assignees,
                creator: ctx.user_id,
                start_date: req.start_date,
                finish_date: req.finish_date,
                importance: req.importance,
                order: self.order_keys.next(),
            }))
            .await?;

        self.logs
            .insert(LogEntry::new(
                ctx.user_id,
                TargetRef::task(task.id),
                LogEvent::Created,
            ))
            .await?;

        info!(
            user_id = %ctx.user_id,
            task_id = %task.id,
            parent = ?task.parent,
            "Task created"
        );

        Ok(task)
    }

    /// Applies a partial update. Status changes and new assignees each
    /// append an audit log entry.
    pub async fn update_task(
        &self,
        ctx: &RequestContext,
        id: TaskId,
        req: UpdateTaskRequest,
    ) -> AppResult<Task> {
        let before = self
            .tasks
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))?;

        let status_change = req.status.filter(|status| *status != before.status);
        let new_assignees: Vec<UserId> = req
            .assignees
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|assignee| !before.assignees.contains(assignee))
            .copied()
            .collect();

        let updated = self
            .tasks
            .update(id, |task| {
                if let Some(name) = req.name {
                    task.name = name;
                }
                if let Some(description) = req.description {
                    task.description = description;
                }
                if let Some(assignees) = req.assignees {
                    task.assignees = assignees;
                }
                if let Some(folders) = req.folders {
                    task.folders = folders;
                }
                if let Some(start_date) = req.start_date {
                    task.start_date = Some(start_date);
                }
                if let Some(finish_date) = req.finish_date {
                    task.finish_date = Some(finish_date);
                }
                if let Some(importance) = req.importance {
                    task.importance = importance;
                }
                if let Some(status) = req.status {
                    task.status = status;
                }
            })
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))?;

        if let Some(status) = status_change {
            self.logs
                .insert(LogEntry::new(
                    ctx.user_id,
                    TargetRef::task(id),
                    LogEvent::Status { status },
                ))
                .await?;
        }
        for assignee in new_assignees {
            self.logs
                .insert(LogEntry::new(
                    ctx.user_id,
                    TargetRef::task(id),
                    LogEvent::Assigned { assignee },
                ))
                .await?;
        }

        info!(user_id = %ctx.user_id, task_id = %id, "Task updated");
        Ok(updated)
    }

    /// Reassigns ordering keys pairwise. Best-effort, like
    /// [`crate::folder::FolderService::sort_folders`].
    pub async fn sort_tasks(
        &self,
        ctx: &RequestContext,
        ids: &[TaskId],
        orders: &[i64],
    ) -> AppResult<usize> {
        if ids.len() != orders.len() {
            return Err(AppError::validation(
                "ids and orders must have the same length",
            ));
        }

        let mut updated = 0;
        for (id, order) in ids.iter().zip(orders) {
            if self.tasks.set_order(*id, OrderKey::from_raw(*order)).await? {
                updated += 1;
            } else {
                warn!(task_id = %id, "Skipping reorder of missing task");
            }
        }

        info!(user_id = %ctx.user_id, updated, "Tasks reordered");
        Ok(updated)
    }

    /// Deletes a task, its comments, and every descendant subtask.
    /// Returns whether the task existed; re-deleting is a no-op.
    pub async fn delete_task(&self, ctx: &RequestContext, id: TaskId) -> AppResult<bool> {
        let existed = self.cascade.delete_task(id).await?;
        info!(user_id = %ctx.user_id, task_id = %id, existed, "Task deleted");
        Ok(existed)
    }
}
