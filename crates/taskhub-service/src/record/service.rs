//! Time-tracking record CRUD.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{EpochMillis, RecordId, TaskId};
use taskhub_entity::record::Record;
use taskhub_store::{RecordStore, TaskStore};

use crate::context::RequestContext;

/// Manages time-tracking records.
pub struct RecordService {
    records: Arc<RecordStore>,
    tasks: Arc<TaskStore>,
}

/// Request to create a new record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    /// The task the time was spent on.
    pub task: TaskId,
    /// The day the time was spent.
    pub date: EpochMillis,
    /// Time spent, in minutes.
    pub time_spent: i64,
    /// Optional note.
    pub note: Option<String>,
}

/// Partial update of a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecordRequest {
    /// New day.
    pub date: Option<EpochMillis>,
    /// New time spent, in minutes.
    pub time_spent: Option<i64>,
    /// New note.
    pub note: Option<String>,
}

impl RecordService {
    /// Creates a new record service.
    pub fn new(records: Arc<RecordStore>, tasks: Arc<TaskStore>) -> Self {
        Self { records, tasks }
    }

    /// Gets a record by ID.
    pub async fn get_record(&self, _ctx: &RequestContext, id: RecordId) -> AppResult<Record> {
        self.records
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Record not found"))
    }

    /// The caller-visible record for a task on a given day, if any.
    pub async fn find_record(
        &self,
        _ctx: &RequestContext,
        task: TaskId,
        date: EpochMillis,
    ) -> AppResult<Option<Record>> {
        self.records.by_task_and_date(task, date).await
    }

    /// Every record for a task, oldest day first.
    pub async fn records_for_task(
        &self,
        _ctx: &RequestContext,
        task: TaskId,
    ) -> AppResult<Vec<Record>> {
        self.records.by_task(task).await
    }

    /// Creates a record for the calling user.
    pub async fn create_record(
        &self,
        ctx: &RequestContext,
        req: CreateRecordRequest,
    ) -> AppResult<Record> {
        if req.time_spent <= 0 {
            return Err(AppError::validation("Time spent must be positive"));
        }
        self.tasks
            .get(req.task)
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))?;

        let now = Utc::now();
        let record = self
            .records
            .insert(Record {
                id: RecordId::new(),
                user: ctx.user_id,
                task: req.task,
                date: req.date,
                time_spent: req.time_spent,
                note: req.note,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(user_id = %ctx.user_id, record_id = %record.id, "Record created");
        Ok(record)
    }

    /// Applies a partial update.
    pub async fn update_record(
        &self,
        ctx: &RequestContext,
        id: RecordId,
        req: UpdateRecordRequest,
    ) -> AppResult<Record> {
        if let Some(time_spent) = req.time_spent {
            if time_spent <= 0 {
                return Err(AppError::validation("Time spent must be positive"));
            }
        }

        let updated = self
            .records
            .update(id, |record| {
                if let Some(date) = req.date {
                    record.date = date;
                }
                if let Some(time_spent) = req.time_spent {
                    record.time_spent = time_spent;
                }
                if let Some(note) = req.note {
                    record.note = Some(note);
                }
            })
            .await?
            .ok_or_else(|| AppError::not_found("Record not found"))?;

        info!(user_id = %ctx.user_id, record_id = %id, "Record updated");
        Ok(updated)
    }

    /// Deletes a record. Returns whether it existed.
    pub async fn delete_record(&self, ctx: &RequestContext, id: RecordId) -> AppResult<bool> {
        let removed = self.records.remove(id).await?;
        info!(user_id = %ctx.user_id, record_id = %id, removed, "Record deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_core::types::{OrderKey, UserId};
    use taskhub_entity::task::{CreateTask, Task, TaskImportance};
    use taskhub_entity::user::UserRole;

    async fn fixture() -> (RecordService, RequestContext, TaskId) {
        let records = Arc::new(RecordStore::new());
        let tasks = Arc::new(TaskStore::new());
        let service = RecordService::new(Arc::clone(&records), Arc::clone(&tasks));

        let ctx = RequestContext::new(UserId::new(), "me@example.com".to_string(), UserRole::Member);
        let task = tasks
            .insert(Task::new(CreateTask {
                name: "task".to_string(),
                description: String::new(),
                parent: None,
                folders: Vec::new(),
                assignees: Vec::new(),
                creator: ctx.user_id,
                start_date: None,
                finish_date: None,
                importance: TaskImportance::Normal,
                order: OrderKey::from_raw(0),
            }))
            .await
            .unwrap();

        (service, ctx, task.id)
    }

    #[tokio::test]
    async fn test_create_and_find_by_day() {
        let (service, ctx, task) = fixture().await;
        let date = EpochMillis::parse("2024-03-01").unwrap();
        let record = service
            .create_record(
                &ctx,
                CreateRecordRequest {
                    task,
                    date,
                    time_spent: 90,
                    note: None,
                },
            )
            .await
            .unwrap();

        let found = service.find_record(&ctx, task, date).await.unwrap();
        assert_eq!(found.map(|r| r.id), Some(record.id));

        let other_day = EpochMillis::parse("2024-03-02").unwrap();
        assert!(service.find_record(&ctx, task, other_day).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_for_missing_task_is_rejected() {
        let (service, ctx, _task) = fixture().await;
        let err = service
            .create_record(
                &ctx,
                CreateRecordRequest {
                    task: TaskId::new(),
                    date: EpochMillis::now(),
                    time_spent: 30,
                    note: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, taskhub_core::error::ErrorKind::NotFound);
    }
}
