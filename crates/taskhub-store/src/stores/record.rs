//! Time-tracking record store.

use chrono::Utc;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::{EpochMillis, RecordId, TaskId};
use taskhub_entity::record::Record;

use crate::document::Document;
use crate::memory::Collection;

impl Document for Record {
    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Store for time-tracking records.
#[derive(Debug, Default)]
pub struct RecordStore {
    col: Collection<Record>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a record by id.
    pub async fn get(&self, id: RecordId) -> AppResult<Option<Record>> {
        Ok(self.col.get(id.into_uuid()))
    }

    /// Every record for a task, oldest day first.
    pub async fn by_task(&self, task: TaskId) -> AppResult<Vec<Record>> {
        let mut records = self.col.filter(|r| r.task == task);
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    /// The record for a task on a given calendar day, if any.
    pub async fn by_task_and_date(
        &self,
        task: TaskId,
        date: EpochMillis,
    ) -> AppResult<Option<Record>> {
        let day = date.as_datetime().date_naive();
        Ok(self
            .col
            .filter(|r| r.task == task && r.date.as_datetime().date_naive() == day)
            .into_iter()
            .next())
    }

    /// Persist a new record.
    pub async fn insert(&self, record: Record) -> AppResult<Record> {
        Ok(self.col.insert(record))
    }

    /// Apply a partial update. `None` when the record is absent.
    pub async fn update(
        &self,
        id: RecordId,
        mutate: impl FnOnce(&mut Record),
    ) -> AppResult<Option<Record>> {
        Ok(self.col.update(id.into_uuid(), mutate))
    }

    /// Delete a record. Returns whether it existed.
    pub async fn remove(&self, id: RecordId) -> AppResult<bool> {
        Ok(self.col.remove(id.into_uuid()))
    }
}
