//! Persisted refresh token record and its lifecycle state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A long-lived opaque refresh token as stored by the persistence layer.
///
/// The record itself never changes after creation except for
/// `revoked_at`, which is set once and then stays fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Opaque token value (64 hex characters).
    pub token: String,
    /// User the token was issued to.
    pub user_id: UserId,
    /// When the token was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
    /// When the token stops being usable.
    pub expires_at: DateTime<Utc>,
    /// When the token was revoked, if ever.
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a refresh token at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTokenState {
    /// Usable for minting access tokens.
    Active,
    /// Explicitly revoked. Terminal.
    Revoked,
    /// Past its expiry time. Terminal.
    Expired,
}

impl RefreshToken {
    /// Builds a fresh, unrevoked record.
    pub fn new(
        token: impl Into<String>,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token: token.into(),
            user_id,
            created_at,
            updated_at: created_at,
            expires_at,
            revoked_at: None,
        }
    }

    /// Resolves the lifecycle state at `now`.
    ///
    /// Revocation is checked before expiry: an explicitly revoked token
    /// reports `Revoked` even once its expiry time has also passed.
    pub fn state_at(&self, now: DateTime<Utc>) -> RefreshTokenState {
        if self.revoked_at.is_some() {
            RefreshTokenState::Revoked
        } else if now > self.expires_at {
            RefreshTokenState::Expired
        } else {
            RefreshTokenState::Active
        }
    }
}

impl fmt::Display for RefreshTokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Revoked => write!(f, "revoked"),
            Self::Expired => write!(f, "expired"),
        }
    }
}
