//! Task entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{EpochMillis, FolderId, OrderKey, TaskId, UserId};

use super::importance::TaskImportance;
use super::status::TaskStatus;

/// A unit of work.
///
/// Tasks nest under other tasks through `parent` and belong to folders
/// through `folders`. A task with an empty `folders` list inherits its
/// folder context from ancestor tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Parent task (None for tasks attached directly to a folder).
    pub parent: Option<TaskId>,
    /// Folders this task directly belongs to.
    pub folders: Vec<FolderId>,
    /// Users assigned to the task.
    pub assignees: Vec<UserId>,
    /// The user who created the task.
    pub creator: UserId,
    /// Planned start.
    pub start_date: Option<EpochMillis>,
    /// Planned finish.
    pub finish_date: Option<EpochMillis>,
    /// Importance level.
    pub importance: TaskImportance,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Position among siblings.
    pub order: OrderKey,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Parent task.
    pub parent: Option<TaskId>,
    /// Folders the task directly belongs to.
    pub folders: Vec<FolderId>,
    /// Initial assignees.
    pub assignees: Vec<UserId>,
    /// Creating user.
    pub creator: UserId,
    /// Planned start.
    pub start_date: Option<EpochMillis>,
    /// Planned finish.
    pub finish_date: Option<EpochMillis>,
    /// Importance level.
    pub importance: TaskImportance,
    /// Position among siblings.
    pub order: OrderKey,
}

impl Task {
    /// Materialize a new task document with default status.
    pub fn new(data: CreateTask) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            name: data.name,
            description: data.description,
            parent: data.parent,
            folders: data.folders,
            assignees: data.assignees,
            creator: data.creator,
            start_date: data.start_date,
            finish_date: data.finish_date,
            importance: data.importance,
            status: TaskStatus::default(),
            order: data.order,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this task sits directly under a folder.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}
