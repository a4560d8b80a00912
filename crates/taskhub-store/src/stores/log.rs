//! Log store: audit entries and comments.

use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::LogId;
use taskhub_entity::log::LogEntry;
use taskhub_entity::share::TargetRef;

use crate::document::Document;
use crate::memory::Collection;

impl Document for LogEntry {
    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }
}

/// Store for log documents.
#[derive(Debug, Default)]
pub struct LogStore {
    col: Collection<LogEntry>,
}

impl LogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an entry by id.
    pub async fn get(&self, id: LogId) -> AppResult<Option<LogEntry>> {
        Ok(self.col.get(id.into_uuid()))
    }

    /// Persist a new entry.
    pub async fn insert(&self, entry: LogEntry) -> AppResult<LogEntry> {
        Ok(self.col.insert(entry))
    }

    /// Delete an entry. Returns whether it existed.
    pub async fn remove(&self, id: LogId) -> AppResult<bool> {
        Ok(self.col.remove(id.into_uuid()))
    }

    /// Every entry for a target, oldest first.
    pub async fn by_target(&self, target: TargetRef) -> AppResult<Vec<LogEntry>> {
        let mut entries = self.col.filter(|entry| entry.target == target);
        entries.sort_by_key(|entry| entry.created_at);
        Ok(entries)
    }

    /// Comments for a target, oldest first.
    pub async fn comments_by_target(&self, target: TargetRef) -> AppResult<Vec<LogEntry>> {
        let mut entries = self
            .col
            .filter(|entry| entry.target == target && entry.event.is_comment());
        entries.sort_by_key(|entry| entry.created_at);
        Ok(entries)
    }

    /// The most recent entries across all targets, newest first.
    pub async fn recent(&self, limit: usize) -> AppResult<Vec<LogEntry>> {
        let mut entries = self.col.all();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Delete every entry for a target. Returns how many were removed.
    pub async fn remove_by_target(&self, target: TargetRef) -> AppResult<usize> {
        let doomed = self.col.filter(|entry| entry.target == target);
        let mut removed = 0;
        for entry in doomed {
            if self.col.remove(entry.id.into_uuid()) {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
