//! User store.

use chrono::Utc;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_core::types::{FolderId, UserId};
use taskhub_entity::user::User;

use crate::document::Document;
use crate::memory::Collection;

impl Document for User {
    fn id(&self) -> Uuid {
        self.id.into_uuid()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Store for user documents.
#[derive(Debug, Default)]
pub struct UserStore {
    col: Collection<User>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a user by id.
    pub async fn get(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.col.get(id.into_uuid()))
    }

    /// Find a user by email.
    pub async fn by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.col.filter(|u| u.email == email).into_iter().next())
    }

    /// Every user on a team.
    pub async fn in_team(&self, team: FolderId) -> AppResult<Vec<User>> {
        Ok(self.col.filter(|u| u.team == Some(team)))
    }

    /// Persist a new user.
    pub async fn insert(&self, user: User) -> AppResult<User> {
        Ok(self.col.insert(user))
    }

    /// Apply a partial update. `None` when the user is absent.
    pub async fn update(
        &self,
        id: UserId,
        mutate: impl FnOnce(&mut User),
    ) -> AppResult<Option<User>> {
        Ok(self.col.update(id.into_uuid(), mutate))
    }

    /// Delete a user. Returns whether it existed.
    pub async fn remove(&self, id: UserId) -> AppResult<bool> {
        Ok(self.col.remove(id.into_uuid()))
    }
}
