//! Polymorphic target references for log entries and comments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_core::types::{FolderId, LogId, TaskId};

/// The collection a [`TargetRef`] resolves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// A folder or project.
    Folder,
    /// A task.
    Task,
    /// Another log entry (e.g. a comment replied to).
    Log,
}

/// A `{kind, item}` pair pointing at an entity in a kind-selected
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    /// Which collection the target lives in.
    pub kind: TargetKind,
    /// The target's id.
    pub item: Uuid,
}

impl TargetRef {
    /// Reference a task.
    pub fn task(id: TaskId) -> Self {
        Self {
            kind: TargetKind::Task,
            item: id.into_uuid(),
        }
    }

    /// Reference a folder.
    pub fn folder(id: FolderId) -> Self {
        Self {
            kind: TargetKind::Folder,
            item: id.into_uuid(),
        }
    }

    /// Reference a log entry.
    pub fn log(id: LogId) -> Self {
        Self {
            kind: TargetKind::Log,
            item: id.into_uuid(),
        }
    }
}
