//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{FolderId, UserId};

use super::role::UserRole;
use super::status::UserStatus;

/// A registered (or invited) account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address, unique across the system.
    pub email: String,
    /// Display name, empty until signup completes.
    #[serde(default)]
    pub name: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Argon2id password hash; absent until signup completes.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Job title shown on the profile.
    #[serde(default)]
    pub job_title: String,
    /// Avatar background color.
    pub avatar_color: Option<String>,
    /// The team root folder this user belongs to.
    pub team: Option<FolderId>,
    /// Role on the team.
    pub role: UserRole,
    /// Account lifecycle status.
    pub status: UserStatus,
    /// Last time the user opened their notifications.
    pub read_notifications_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a pending account for an email address.
    pub fn pending(email: String, role: UserRole, team: Option<FolderId>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            name: String::new(),
            first_name: None,
            last_name: None,
            password_hash: None,
            job_title: String::new(),
            avatar_color: None,
            team,
            role,
            status: UserStatus::Pending,
            read_notifications_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if signup has already been completed.
    pub fn has_signed_up(&self) -> bool {
        self.password_hash.is_some()
    }
}
