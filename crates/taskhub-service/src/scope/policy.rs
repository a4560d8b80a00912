//! Automatic sharing grants applied at folder creation.

use taskhub_core::types::FolderId;
use taskhub_entity::share::{ShareGrant, SubjectKind};
use taskhub_entity::user::User;

/// Compute the grant list for a new folder.
///
/// A top-level folder is automatically shared with the creator's team,
/// plus the creator individually when their role is restricted. A
/// nested folder gets no automatic grants; it is reached through its
/// parent. Explicit grants are appended verbatim, except that
/// `Team`-kind grants always resolve to the creator's own team.
pub fn share_policy(
    creator: &User,
    parent: Option<FolderId>,
    explicit: &[ShareGrant],
) -> Vec<ShareGrant> {
    let mut grants = Vec::new();

    if parent.is_none() {
        if let Some(team) = creator.team {
            grants.push(ShareGrant::new(SubjectKind::Team, team.into_uuid()));
        }
        if creator.role.is_restricted() {
            grants.push(ShareGrant::new(
                SubjectKind::Collaborator,
                creator.id.into_uuid(),
            ));
        }
    }

    for grant in explicit {
        match grant.kind {
            SubjectKind::Team => {
                if let Some(team) = creator.team {
                    grants.push(ShareGrant::new(SubjectKind::Team, team.into_uuid()));
                }
            }
            _ => grants.push(*grant),
        }
    }

    grants
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_entity::user::UserRole;
    use uuid::Uuid;

    fn user(role: UserRole, team: Option<FolderId>) -> User {
        let mut user = User::pending("a@example.com".to_string(), role, team);
        user.name = "A".to_string();
        user
    }

    #[test]
    fn test_root_folder_gets_team_grant() {
        let team = FolderId::new();
        let grants = share_policy(&user(UserRole::Member, Some(team)), None, &[]);
        assert_eq!(
            grants,
            vec![ShareGrant::new(SubjectKind::Team, team.into_uuid())]
        );
    }

    #[test]
    fn test_restricted_creator_also_granted_individually() {
        let team = FolderId::new();
        let creator = user(UserRole::Collaborator, Some(team));
        let grants = share_policy(&creator, None, &[]);
        assert_eq!(grants.len(), 2);
        assert_eq!(grants[1].kind, SubjectKind::Collaborator);
        assert_eq!(grants[1].item, creator.id.into_uuid());
    }

    #[test]
    fn test_nested_folder_gets_no_automatic_grants() {
        let team = FolderId::new();
        let explicit = [ShareGrant::new(SubjectKind::User, Uuid::new_v4())];
        let grants = share_policy(
            &user(UserRole::Member, Some(team)),
            Some(FolderId::new()),
            &explicit,
        );
        assert_eq!(grants, explicit.to_vec());
    }

    #[test]
    fn test_explicit_team_grant_resolves_to_own_team() {
        let team = FolderId::new();
        let foreign = ShareGrant::new(SubjectKind::Team, Uuid::new_v4());
        let grants = share_policy(
            &user(UserRole::Member, Some(team)),
            Some(FolderId::new()),
            &[foreign],
        );
        assert_eq!(
            grants,
            vec![ShareGrant::new(SubjectKind::Team, team.into_uuid())]
        );
    }
}
