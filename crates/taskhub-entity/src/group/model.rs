//! Group entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{FolderId, GroupId, UserId};

/// A named set of users within one team, used as a sharing target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    pub id: GroupId,
    /// The team this group belongs to.
    pub team: Option<FolderId>,
    /// Group name.
    pub name: String,
    /// Short initials shown on the avatar.
    #[serde(default)]
    pub initials: String,
    /// Avatar background color.
    pub avatar_color: Option<String>,
    /// Member user ids.
    pub users: Vec<UserId>,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
    /// When the group was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Check if a user belongs to this group.
    pub fn contains(&self, user: UserId) -> bool {
        self.users.contains(&user)
    }
}
