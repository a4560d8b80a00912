//! Time-tracking record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{EpochMillis, RecordId, TaskId, UserId};

/// One time-tracking entry. No tree semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Unique record identifier.
    pub id: RecordId,
    /// The user who spent the time.
    pub user: UserId,
    /// The task the time was spent on.
    pub task: TaskId,
    /// The day the time was spent.
    pub date: EpochMillis,
    /// Time spent, in minutes.
    pub time_spent: i64,
    /// Optional note.
    pub note: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}
