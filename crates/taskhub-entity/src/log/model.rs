//! Log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{LogId, UserId};

use super::event::LogEvent;
use crate::share::TargetRef;

/// One entry in the activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique entry identifier.
    pub id: LogId,
    /// The user who performed the action.
    pub actor: UserId,
    /// What the action happened to.
    pub target: TargetRef,
    /// The action itself.
    pub event: LogEvent,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    /// Record a new entry now.
    pub fn new(actor: UserId, target: TargetRef, event: LogEvent) -> Self {
        Self {
            id: LogId::new(),
            actor,
            target,
            event,
            created_at: Utc::now(),
        }
    }
}
