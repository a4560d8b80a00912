//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT signing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign tokens.
    pub jwt_secret: String,
    /// Token lifetime for regular logins, in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
    /// Token lifetime for freshly signed-up accounts, in hours.
    ///
    /// Issued once at signup so a new user stays logged in while they
    /// finish setting up their workspace.
    #[serde(default = "default_signup_token_ttl_hours")]
    pub signup_token_ttl_hours: u64,
}

fn default_token_ttl_hours() -> u64 {
    24
}

fn default_signup_token_ttl_hours() -> u64 {
    24 * 365
}
