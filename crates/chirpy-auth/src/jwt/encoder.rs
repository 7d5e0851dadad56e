//! Access token creation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use chirpy_core::config::AuthConfig;
use chirpy_core::traits::{Clock, SystemClock};
use chirpy_core::types::UserId;

use super::claims::Claims;
use crate::error::AuthError;

/// A freshly signed access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Compact `header.payload.signature` form.
    pub token: String,
    /// When the token stops validating.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Lifetime of tokens minted by [`generate_access_token`](Self::generate_access_token).
    access_ttl: Duration,
    /// Source of the issued-at time.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates an encoder for `secret` minting tokens valid for `access_ttl`.
    pub fn new(secret: &str, access_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            clock,
        }
    }

    /// Creates an encoder from auth configuration.
    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(&config.jwt_secret, config.access_token_ttl(), clock)
    }

    /// Generates an access token for `user_id` with the configured TTL.
    pub fn generate_access_token(&self, user_id: UserId) -> Result<AccessToken, AuthError> {
        self.generate_with_ttl(user_id, self.access_ttl)
    }

    /// Generates an access token for `user_id` valid for `ttl`.
    ///
    /// A negative `ttl` yields a token that is already expired. A `ttl` that
    /// pushes the expiry past the representable range is
    /// [`AuthError::LifetimeOutOfRange`].
    pub fn generate_with_ttl(
        &self,
        user_id: UserId,
        ttl: Duration,
    ) -> Result<AccessToken, AuthError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::LifetimeOutOfRange(format!("access token ttl {ttl}")))?;
        let claims = Claims::new(user_id, now, expires_at);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningFailure(e.to_string()))?;

        Ok(AccessToken {
            token,
            expires_at,
        })
    }
}

/// Signs an access token for `user_id` with `secret`, expiring after `expires_in`.
pub fn make_jwt(user_id: UserId, secret: &str, expires_in: Duration) -> Result<String, AuthError> {
    JwtEncoder::new(secret, expires_in, Arc::new(SystemClock))
        .generate_access_token(user_id)
        .map(|access| access.token)
}
