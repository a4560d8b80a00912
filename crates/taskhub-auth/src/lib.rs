//! # taskhub-auth
//!
//! Identity resolution and credential handling: HMAC-signed JWTs and
//! Argon2id password hashing. Both are constructed once from
//! [`taskhub_core::config::AuthConfig`] and injected into request-scoped
//! services.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
