//! Slack webhook payloads.

/// Payload announcing a new comment on a task.
pub fn comment_posted(task_name: &str, author_name: &str, body: &str) -> serde_json::Value {
    serde_json::json!({
        "text": format!("*{author_name}* commented on *{task_name}*:\n{body}"),
    })
}
