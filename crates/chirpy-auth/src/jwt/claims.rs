//! Claims carried by every access token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chirpy_core::types::UserId;

use crate::error::AuthError;

/// Issuer stamped into, and required on, every access token.
pub const TOKEN_ISSUER: &str = "chirpy";

/// JWT claims payload embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, always [`TOKEN_ISSUER`] for tokens we mint.
    pub iss: String,
    /// Subject, the user ID as a UUID string.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Builds claims for `user_id` issued at `issued_at` and expiring at `expires_at`.
    pub fn new(user_id: UserId, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Parses the subject claim into a user ID.
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::InvalidSubject(self.sub.clone()))
    }

    /// Checks whether this token has expired at `now`, allowing `leeway_seconds` of skew.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_seconds: i64) -> bool {
        now.timestamp() >= self.exp.saturating_add(leeway_seconds)
    }

    /// Checks whether this token claims an issue time beyond `now` plus leeway.
    pub fn is_issued_after(&self, now: DateTime<Utc>, leeway_seconds: i64) -> bool {
        self.iat > now.timestamp().saturating_add(leeway_seconds)
    }
}
