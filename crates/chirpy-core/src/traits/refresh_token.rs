//! Persistence contract for refresh tokens.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::refresh_token::RefreshToken;

/// Storage backend for refresh tokens, keyed by the opaque token string.
///
/// Implementations must make each operation atomic on a single token and
/// read-after-write consistent: once `revoke` has returned, every later
/// `find_by_token` for that token observes `revoked_at`.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a newly issued token and return the stored record.
    ///
    /// Fails with a `Conflict` error if the token value already exists.
    async fn create(&self, token: RefreshToken) -> AppResult<RefreshToken>;

    /// Look up a token by its opaque value.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// Mark a token revoked at `revoked_at`.
    ///
    /// Returns `true` if the token moved from unrevoked to revoked, and
    /// `false` if it does not exist or was already revoked. An existing
    /// `revoked_at` is never overwritten.
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> AppResult<bool>;
}
