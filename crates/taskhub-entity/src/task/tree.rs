//! Task tree structure with inherited folder context.

use serde::{Deserialize, Serialize};

use taskhub_core::types::{FolderId, TaskId, UserId};

use super::importance::TaskImportance;
use super::status::TaskStatus;

/// A node in an expanded task tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskNode {
    /// Task ID.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Importance level.
    pub importance: TaskImportance,
    /// Users assigned to the task.
    pub assignees: Vec<UserId>,
    /// The task's own folders merged with every ancestor task's folders,
    /// deduplicated, first-seen order. Used for breadcrumb display.
    pub inherited_folders: Vec<FolderId>,
    /// Child subtrees, in stored sibling order.
    pub subtasks: Vec<TaskNode>,
}

impl TaskNode {
    /// Total number of tasks in this subtree, the node included.
    pub fn len(&self) -> usize {
        1 + self.subtasks.iter().map(TaskNode::len).sum::<usize>()
    }

    /// Whether the subtree consists of this node alone.
    pub fn is_empty(&self) -> bool {
        self.subtasks.is_empty()
    }
}
