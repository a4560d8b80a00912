//! Sharing grant model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of subject a folder is shared with.
///
/// The `item` id of a grant resolves into a different collection
/// depending on this discriminant: users for `User`/`Collaborator`,
/// team folders for `Team`, groups for `Group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    /// A single user.
    User,
    /// Every member of a team.
    Team,
    /// Every member of a group.
    Group,
    /// An individual grant for a restricted (external/collaborator) user.
    Collaborator,
}

/// A single visibility grant on a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareGrant {
    /// What kind of subject the grant targets.
    pub kind: SubjectKind,
    /// The subject's id, resolved per `kind`.
    pub item: Uuid,
}

impl ShareGrant {
    /// Build a grant.
    pub fn new(kind: SubjectKind, item: Uuid) -> Self {
        Self { kind, item }
    }

    /// Whether this grant matches any of the given share keys.
    pub fn matches_any(&self, keys: &[Uuid]) -> bool {
        keys.contains(&self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any() {
        let subject = Uuid::new_v4();
        let grant = ShareGrant::new(SubjectKind::Group, subject);
        assert!(grant.matches_any(&[Uuid::new_v4(), subject]));
        assert!(!grant.matches_any(&[Uuid::new_v4()]));
    }
}
