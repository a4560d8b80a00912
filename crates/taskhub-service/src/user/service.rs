//! Account lifecycle: email capture, invitations, signup, login, and
//! profile updates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use taskhub_auth::jwt::JwtEncoder;
use taskhub_auth::password::PasswordHasher;
use taskhub_core::config::MailConfig;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::{GroupId, OrderKeyGenerator, UserId};
use taskhub_entity::folder::{CreateFolder, Folder, FolderKind};
use taskhub_entity::share::{ShareGrant, SubjectKind};
use taskhub_entity::user::{User, UserRole, UserStatus};
use taskhub_store::{FolderStore, GroupStore, UserStore};
use taskhub_worker::queue::{Outbound, OutboundQueue};

use crate::context::RequestContext;
use crate::notify::emails;

/// Manages accounts and issues tokens.
pub struct UserService {
    users: Arc<UserStore>,
    folders: Arc<FolderStore>,
    groups: Arc<GroupStore>,
    hasher: Arc<PasswordHasher>,
    jwt: Arc<JwtEncoder>,
    queue: OutboundQueue,
    mail: MailConfig,
    order_keys: Arc<OrderKeyGenerator>,
}

/// A token plus the user it authenticates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    /// Signed bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Outcome of an invitation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteOutcome {
    /// Addresses that already belonged to the team and were skipped.
    pub existing: Vec<String>,
    /// Newly created pending users.
    pub invited: Vec<UserId>,
}

/// Partial update of the caller's own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New job title.
    pub job_title: Option<String>,
    /// New avatar color.
    pub avatar_color: Option<String>,
    /// Notification read marker.
    pub read_notifications_at: Option<DateTime<Utc>>,
}

impl UserService {
    /// Creates a new user service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserStore>,
        folders: Arc<FolderStore>,
        groups: Arc<GroupStore>,
        hasher: Arc<PasswordHasher>,
        jwt: Arc<JwtEncoder>,
        queue: OutboundQueue,
        mail: MailConfig,
        order_keys: Arc<OrderKeyGenerator>,
    ) -> Self {
        Self {
            users,
            folders,
            groups,
            hasher,
            jwt,
            queue,
            mail,
            order_keys,
        }
    }

    async fn current_user(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .get(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Unknown user"))
    }

    /// Registers an email address as a pending owner account and sends
    /// a welcome email. Duplicate addresses are a conflict.
    pub async fn capture_email(&self, email: &str) -> AppResult<User> {
        if self.users.by_email(email).await?.is_some() {
            return Err(AppError::conflict("This email is already taken"));
        }

        let user = self
            .users
            .insert(User::pending(email.to_string(), UserRole::Owner, None))
            .await?;

        self.queue.enqueue(Outbound::Email(emails::welcome_email(
            &self.mail, email, user.id,
        )));

        info!(user_id = %user.id, "Email captured");
        Ok(user)
    }

    /// Invites a batch of addresses onto the caller's team with a role,
    /// adds the new users to the given groups, and sends invitation
    /// emails. Returns the addresses that were already on the team.
    pub async fn invite(
        &self,
        ctx: &RequestContext,
        addresses: &[String],
        groups: &[GroupId],
        role: UserRole,
    ) -> AppResult<InviteOutcome> {
        let inviter = self.current_user(ctx).await?;
        let team = inviter
            .team
            .ok_or_else(|| AppError::validation("Inviting requires a team"))?;

        let team_emails: Vec<String> = self
            .users
            .in_team(team)
            .await?
            .into_iter()
            .map(|u| u.email)
            .collect();

        let mut existing = Vec::new();
        let mut invited = Vec::new();
        for email in addresses {
            if team_emails.contains(email) {
                existing.push(email.clone());
                continue;
            }

            let user = self
                .users
                .insert(User::pending(email.clone(), role, Some(team)))
                .await?;
            invited.push(user.id);

            self.queue.enqueue(Outbound::Email(emails::invitation_email(
                &self.mail,
                email,
                user.id,
                &inviter.name,
            )));
        }

        for group_id in groups {
            let updated = self
                .groups
                .update(*group_id, |group| {
                    for user in &invited {
                        if !group.users.contains(user) {
                            group.users.push(*user);
                        }
                    }
                })
                .await?;
            if updated.is_none() {
                warn!(group_id = %group_id, "Skipping missing group during invite");
            }
        }

        info!(
            user_id = %ctx.user_id,
            invited = invited.len(),
            existing = existing.len(),
            "Invitations processed"
        );

        Ok(InviteOutcome { existing, invited })
    }

    /// Marks a pending invitation as declined.
    pub async fn decline(&self, id: UserId) -> AppResult<User> {
        let user = self
            .users
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        if user.status != UserStatus::Pending {
            return Err(AppError::conflict("Only pending invitations can be declined"));
        }

        let declined = self
            .users
            .update(id, |user| user.status = UserStatus::Declined)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %id, "Invitation declined");
        Ok(declined)
    }

    /// Completes a signup: sets name and password, activates the
    /// account, and — for owners — creates their team root folder.
    /// Returns a long-lived token.
    pub async fn signup(&self, id: UserId, name: &str, password: &str) -> AppResult<AuthPayload> {
        let user = self
            .users
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        if user.has_signed_up() {
            return Err(AppError::conflict("You have already signed up"));
        }
        if name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
        if password.len() < 8 {
            return Err(AppError::validation(
                "Password must be at least 8 characters",
            ));
        }

        let password_hash = self.hasher.hash(password)?;

        let team = match (user.role, user.team) {
            (UserRole::Owner, None) => Some(self.create_team(name).await?.id),
            (_, team) => team,
        };

        let user = self
            .users
            .update(id, |user| {
                user.name = name.to_string();
                user.password_hash = Some(password_hash);
                user.status = UserStatus::Active;
                user.team = team;
            })
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let token = self.jwt.signup_token(user.id, &user.email, user.role)?;

        info!(user_id = %id, "Signup completed");
        Ok(AuthPayload { token, user })
    }

    async fn create_team(&self, owner_name: &str) -> AppResult<Folder> {
        let mut team = Folder::new(CreateFolder {
            kind: FolderKind::Team,
            name: format!("{owner_name}'s Team"),
            description: String::new(),
            parent: None,
            share_with: Vec::new(),
            order: self.order_keys.next(),
        });
        // The team root is discoverable by its own members.
        team.share_with = vec![ShareGrant::new(SubjectKind::Team, team.id.into_uuid())];
        self.folders.insert(team).await
    }

    /// Verifies a credential pair and issues a token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthPayload> {
        let user = self
            .users
            .by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("No user with that email"))?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::authentication("Signup has not been completed"))?;
        if !self.hasher.verify(password, hash)? {
            return Err(AppError::authentication("Incorrect password"));
        }
        if !user.status.can_login() {
            return Err(AppError::authentication("Account is not active"));
        }

        let token = self.jwt.login_token(user.id, &user.email, user.role)?;

        info!(user_id = %user.id, "Login succeeded");
        Ok(AuthPayload { token, user })
    }

    /// Gets a user: the given id, or the caller when omitted.
    pub async fn get_user(&self, ctx: &RequestContext, id: Option<UserId>) -> AppResult<User> {
        let id = id.unwrap_or(ctx.user_id);
        self.users
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Every user on the caller's team.
    pub async fn get_users(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        let user = self.current_user(ctx).await?;
        match user.team {
            Some(team) => self.users.in_team(team).await,
            None => Ok(vec![user]),
        }
    }

    /// Applies a partial update to the caller's own profile.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        req: UpdateUserRequest,
    ) -> AppResult<User> {
        let updated = self
            .users
            .update(ctx.user_id, |user| {
                if let Some(name) = req.name {
                    user.name = name;
                }
                if let Some(first_name) = req.first_name {
                    user.first_name = Some(first_name);
                }
                if let Some(last_name) = req.last_name {
                    user.last_name = Some(last_name);
                }
                if let Some(job_title) = req.job_title {
                    user.job_title = job_title;
                }
                if let Some(avatar_color) = req.avatar_color {
                    user.avatar_color = Some(avatar_color);
                }
                if let Some(read_at) = req.read_notifications_at {
                    user.read_notifications_at = Some(read_at);
                }
            })
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_core::config::AuthConfig;
    use taskhub_entity::group::Group;
    use tokio::sync::mpsc;

    struct Fixture {
        users: Arc<UserStore>,
        folders: Arc<FolderStore>,
        groups: Arc<GroupStore>,
        service: UserService,
        outbound: mpsc::Receiver<Outbound>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(UserStore::new());
        let folders = Arc::new(FolderStore::new());
        let groups = Arc::new(GroupStore::new());
        let (queue, outbound) = OutboundQueue::new(32);

        let auth = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: 24,
            signup_token_ttl_hours: 24 * 365,
        };
        let mail = MailConfig {
            client_url: "https://app.example.com".to_string(),
            from_address: "no-reply@example.com".to_string(),
            from_name: "TaskHub".to_string(),
            delivery_endpoint: "https://mail.example.com/send".to_string(),
        };

        let service = UserService::new(
            Arc::clone(&users),
            Arc::clone(&folders),
            Arc::clone(&groups),
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&auth)),
            queue,
            mail,
            Arc::new(OrderKeyGenerator::new()),
        );

        Fixture {
            users,
            folders,
            groups,
            service,
            outbound,
        }
    }

    #[tokio::test]
    async fn test_capture_email_rejects_duplicates() {
        let fx = fixture();
        fx.service.capture_email("a@example.com").await.unwrap();

        let err = fx.service.capture_email("a@example.com").await.unwrap_err();
        assert_eq!(err.kind, taskhub_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_owner_signup_creates_team_root() {
        let fx = fixture();
        let captured = fx.service.capture_email("owner@example.com").await.unwrap();

        let payload = fx
            .service
            .signup(captured.id, "Avery", "s3cret-pass")
            .await
            .unwrap();

        let team_id = payload.user.team.expect("owner should get a team");
        let team = fx.folders.get(team_id).await.unwrap().unwrap();
        assert!(team.is_team());
        assert_eq!(team.name, "Avery's Team");
        assert_eq!(team.share_with.len(), 1);
        assert_eq!(team.share_with[0].item, team_id.into_uuid());
        assert_eq!(payload.user.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_double_signup_is_conflict() {
        let fx = fixture();
        let captured = fx.service.capture_email("owner@example.com").await.unwrap();
        fx.service
            .signup(captured.id, "Avery", "s3cret-pass")
            .await
            .unwrap();

        let err = fx
            .service
            .signup(captured.id, "Avery", "another-pass")
            .await
            .unwrap_err();
        assert_eq!(err.kind, taskhub_core::error::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let fx = fixture();
        let captured = fx.service.capture_email("owner@example.com").await.unwrap();
        fx.service
            .signup(captured.id, "Avery", "s3cret-pass")
            .await
            .unwrap();

        assert!(
            fx.service
                .login("owner@example.com", "s3cret-pass")
                .await
                .is_ok()
        );
        let err = fx
            .service
            .login("owner@example.com", "wrong-pass")
            .await
            .unwrap_err();
        assert_eq!(err.kind, taskhub_core::error::ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_invite_skips_existing_and_fills_groups() {
        let mut fx = fixture();
        let captured = fx.service.capture_email("owner@example.com").await.unwrap();
        let owner = fx
            .service
            .signup(captured.id, "Avery", "s3cret-pass")
            .await
            .unwrap()
            .user;
        let ctx = RequestContext::new(owner.id, owner.email.clone(), owner.role);

        let now = Utc::now();
        let group = fx
            .groups
            .insert(Group {
                id: GroupId::new(),
                team: owner.team,
                name: "devs".to_string(),
                initials: "DV".to_string(),
                avatar_color: None,
                users: Vec::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let outcome = fx
            .service
            .invite(
                &ctx,
                &["owner@example.com".to_string(), "new@example.com".to_string()],
                &[group.id],
                UserRole::Member,
            )
            .await
            .unwrap();

        assert_eq!(outcome.existing, vec!["owner@example.com".to_string()]);
        assert_eq!(outcome.invited.len(), 1);

        let group = fx.groups.get(group.id).await.unwrap().unwrap();
        assert_eq!(group.users, outcome.invited);

        let invited = fx.users.get(outcome.invited[0]).await.unwrap().unwrap();
        assert_eq!(invited.status, UserStatus::Pending);
        assert_eq!(invited.team, owner.team);

        // One welcome (capture) plus one invitation email were queued.
        let mut emails = 0;
        while let Ok(message) = fx.outbound.try_recv() {
            if matches!(message, Outbound::Email(_)) {
                emails += 1;
            }
        }
        assert_eq!(emails, 2);
    }

    #[tokio::test]
    async fn test_decline_requires_pending() {
        let fx = fixture();
        let captured = fx.service.capture_email("owner@example.com").await.unwrap();
        fx.service.decline(captured.id).await.unwrap();

        let declined = fx.users.get(captured.id).await.unwrap().unwrap();
        assert_eq!(declined.status, UserStatus::Declined);

        let err = fx.service.decline(captured.id).await.unwrap_err();
        assert_eq!(err.kind, taskhub_core::error::ErrorKind::Conflict);
    }
}
