//! User account status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an account from invitation to activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Invited or captured, signup not completed.
    Pending,
    /// Signup completed; can log in.
    Active,
    /// Declined the invitation.
    Declined,
}

impl UserStatus {
    /// Check if the account can log in.
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Declined => "declined",
        };
        write!(f, "{s}")
    }
}
