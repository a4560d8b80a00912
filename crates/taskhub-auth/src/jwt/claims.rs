//! JWT claim payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_core::types::UserId;
use taskhub_entity::user::UserRole;

/// Claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's id.
    pub sub: Uuid,
    /// The user's email at issue time.
    pub email: String,
    /// The user's role at issue time.
    pub role: UserRole,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

impl Claims {
    /// The subject as a typed user id.
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}
