//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available on a team.
///
/// `ExternalUser` and `Collaborator` form the restricted set: they never
/// see team-shared folders unless granted individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Created the team; full control.
    Owner,
    /// Regular team member.
    Member,
    /// Outside party with limited default visibility.
    ExternalUser,
    /// Outside party with limited default visibility.
    Collaborator,
}

impl UserRole {
    /// Check if this role only sees individually granted folders.
    pub fn is_restricted(&self) -> bool {
        matches!(self, Self::ExternalUser | Self::Collaborator)
    }

    /// Check if this role owns the team.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Member => "member",
            Self::ExternalUser => "external_user",
            Self::Collaborator => "collaborator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = taskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "member" => Ok(Self::Member),
            "external_user" => Ok(Self::ExternalUser),
            "collaborator" => Ok(Self::Collaborator),
            _ => Err(taskhub_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: owner, member, external_user, collaborator"
            ))),
        }
    }
}
