//! Task lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a task sits in its lifecycle. New tasks default to `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, not started.
    #[default]
    New,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
    /// Abandoned without completion.
    Cancelled,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}
