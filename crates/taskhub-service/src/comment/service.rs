//! Comment creation/deletion and activity log queries.
//!
//! A comment on a task may trigger a Slack notification, routed to the
//! webhook configured on the task's root folder. The notification is
//! queued after the comment is committed; nothing on that path can fail
//! the write.

use std::sync::Arc;

use tracing::{debug, info};

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{LogId, TaskId};
use taskhub_entity::log::{LogEntry, LogEvent};
use taskhub_entity::share::{TargetKind, TargetRef};
use taskhub_store::{FolderStore, LogStore, TaskStore, UserStore};
use taskhub_worker::queue::{Outbound, OutboundQueue};

use crate::context::RequestContext;
use crate::hierarchy::TreeBuilder;
use crate::notify::slack;

/// Manages comments and the activity log.
pub struct CommentService {
    logs: Arc<LogStore>,
    tasks: Arc<TaskStore>,
    folders: Arc<FolderStore>,
    users: Arc<UserStore>,
    tree: Arc<TreeBuilder>,
    queue: OutboundQueue,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        logs: Arc<LogStore>,
        tasks: Arc<TaskStore>,
        folders: Arc<FolderStore>,
        users: Arc<UserStore>,
        tree: Arc<TreeBuilder>,
        queue: OutboundQueue,
    ) -> Self {
        Self {
            logs,
            tasks,
            folders,
            users,
            tree,
            queue,
        }
    }

    /// Comments on a target, oldest first.
    pub async fn get_comments(
        &self,
        _ctx: &RequestContext,
        target: TargetRef,
    ) -> AppResult<Vec<LogEntry>> {
        self.logs.comments_by_target(target).await
    }

    /// The most recent activity log entries, newest first.
    pub async fn get_logs(&self, _ctx: &RequestContext, limit: usize) -> AppResult<Vec<LogEntry>> {
        self.logs.recent(limit).await
    }

    /// Posts a comment. The comment is committed first; a Slack
    /// notification for task targets is queued afterwards and its
    /// failure is never surfaced.
    pub async fn create_comment(
        &self,
        ctx: &RequestContext,
        target: TargetRef,
        body: String,
    ) -> AppResult<LogEntry> {
        if body.trim().is_empty() {
            return Err(AppError::validation("Comment body cannot be empty"));
        }
        if target.kind == TargetKind::Task {
            let task = TaskId::from_uuid(target.item);
            self.tasks
                .get(task)
                .await?
                .ok_or_else(|| AppError::not_found("Task not found"))?;
        }

        let entry = self
            .logs
            .insert(LogEntry::new(
                ctx.user_id,
                target,
                LogEvent::Comment { body },
            ))
            .await?;

        info!(user_id = %ctx.user_id, log_id = %entry.id, "Comment created");

        if target.kind == TargetKind::Task {
            if let Err(e) = self
                .queue_comment_notification(ctx, TaskId::from_uuid(target.item), &entry)
                .await
            {
                debug!(error = %e, "Skipping comment notification");
            }
        }

        Ok(entry)
    }

    /// Deletes a comment. Non-comment log entries cannot be deleted
    /// this way. Returns whether the comment existed.
    pub async fn delete_comment(&self, ctx: &RequestContext, id: LogId) -> AppResult<bool> {
        let Some(entry) = self.logs.get(id).await? else {
            return Ok(false);
        };
        if !entry.event.is_comment() {
            return Err(AppError::validation("Only comments can be deleted"));
        }

        let removed = self.logs.remove(id).await?;
        info!(user_id = %ctx.user_id, log_id = %id, "Comment deleted");
        Ok(removed)
    }

    /// Resolve the task's root folder and queue a webhook if one is
    /// configured there.
    async fn queue_comment_notification(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        entry: &LogEntry,
    ) -> AppResult<()> {
        let Some(task) = self.tasks.get(task_id).await? else {
            return Ok(());
        };

        let inherited = self.tree.inherited_folders(&task).await?;
        let Some(first_folder) = inherited.first() else {
            return Ok(());
        };
        let Some(folder) = self.folders.get(*first_folder).await? else {
            return Ok(());
        };

        let root = self.tree.root_folder(&folder).await?;
        let Some(webhook) = root.slack_webhook else {
            return Ok(());
        };

        let author = match self.users.get(ctx.user_id).await? {
            Some(user) if !user.name.is_empty() => user.name,
            _ => ctx.email.clone(),
        };
        let body = match &entry.event {
            LogEvent::Comment { body } => body.as_str(),
            _ => return Ok(()),
        };

        self.queue.enqueue(Outbound::Webhook {
            url: webhook,
            payload: slack::comment_posted(&task.name, &author, body),
        });
        Ok(())
    }
}
