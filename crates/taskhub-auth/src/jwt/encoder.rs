//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use taskhub_core::config::AuthConfig;
use taskhub_core::error::AppError;
use taskhub_core::types::UserId;
use taskhub_entity::user::UserRole;

use super::claims::Claims;

/// Creates signed tokens for authenticated users.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Regular login token TTL in hours.
    token_ttl_hours: i64,
    /// Signup token TTL in hours.
    signup_token_ttl_hours: i64,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl_hours: config.token_ttl_hours as i64,
            signup_token_ttl_hours: config.signup_token_ttl_hours as i64,
        }
    }

    /// Issues a token after a successful login.
    pub fn login_token(
        &self,
        user_id: UserId,
        email: &str,
        role: UserRole,
    ) -> Result<String, AppError> {
        self.issue(user_id, email, role, self.token_ttl_hours)
    }

    /// Issues a long-lived token after a completed signup.
    pub fn signup_token(
        &self,
        user_id: UserId,
        email: &str,
        role: UserRole,
    ) -> Result<String, AppError> {
        self.issue(user_id, email, role, self.signup_token_ttl_hours)
    }

    fn issue(
        &self,
        user_id: UserId,
        email: &str,
        role: UserRole,
        ttl_hours: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.into_uuid(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(ttl_hours)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish_non_exhaustive()
    }
}
