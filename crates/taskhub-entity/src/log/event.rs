//! Log event variants.

use serde::{Deserialize, Serialize};

use taskhub_core::types::UserId;

use crate::task::TaskStatus;

/// What happened to the target of a log entry.
///
/// Comments share the log collection with audit events; a comment is a
/// log entry whose event carries a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEvent {
    /// The target was created.
    Created,
    /// The target's status changed.
    Status {
        /// The new status.
        status: TaskStatus,
    },
    /// Someone was assigned to the target.
    Assigned {
        /// The new assignee.
        assignee: UserId,
    },
    /// A comment was posted on the target.
    Comment {
        /// The comment body.
        body: String,
    },
}

impl LogEvent {
    /// Whether this entry is a comment.
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment { .. })
    }
}
