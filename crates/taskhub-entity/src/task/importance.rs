//! Task importance levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How urgent a task is. New tasks default to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskImportance {
    /// Can wait.
    Low,
    /// Default priority.
    #[default]
    Normal,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Urgent,
}

impl fmt::Display for TaskImportance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        };
        write!(f, "{s}")
    }
}
