//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::UserId;
use taskhub_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted from the bearer token by the API layer and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's email at token issue time.
    pub email: String,
    /// The user's role at token issue time.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, email: String, role: UserRole) -> Self {
        Self {
            user_id,
            email,
            role,
            request_time: Utc::now(),
        }
    }
}
