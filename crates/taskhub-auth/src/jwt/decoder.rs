//! JWT validation. The identity resolver: credential in, user id out,
//! failing closed on anything absent, malformed, or expired.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use taskhub_core::config::AuthConfig;
use taskhub_core::error::AppError;

use super::claims::Claims;

/// Validates bearer tokens and extracts their claims.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate a token.
    ///
    /// Every failure mode maps to an authentication error; callers never
    /// learn whether the signature, shape, or expiry was at fault.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                AppError::authentication("Invalid or expired token")
            })
    }
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder").finish_non_exhaustive()
    }
}
