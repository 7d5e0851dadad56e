//! Refresh token lifecycle on top of a [`RefreshTokenRepository`].

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use chirpy_core::traits::{Clock, RefreshTokenRepository};
use chirpy_core::types::{RefreshToken, RefreshTokenState, UserId};

use super::generator::make_refresh_token;
use crate::error::AuthError;

/// Issues, resolves, and revokes refresh tokens.
///
/// Storage errors are returned as [`AuthError::Store`] without retry.
#[derive(Clone)]
pub struct RefreshTokenService {
    /// Persistence collaborator.
    repo: Arc<dyn RefreshTokenRepository>,
    /// Source of creation, expiry, and revocation times.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for RefreshTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenService").finish_non_exhaustive()
    }
}

impl RefreshTokenService {
    /// Creates a service over `repo`.
    pub fn new(repo: Arc<dyn RefreshTokenRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Generates and persists a token for `owner` that expires after `ttl`.
    pub async fn create(&self, owner: UserId, ttl: Duration) -> Result<RefreshToken, AuthError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::LifetimeOutOfRange(format!("refresh token ttl {ttl}")))?;

        let token = make_refresh_token()?;
        let record = RefreshToken::new(token, owner, now, expires_at);

        let stored = self.repo.create(record).await?;
        debug!(user_id = %owner, expires_at = %stored.expires_at, "Refresh token created");
        Ok(stored)
    }

    /// Looks up a token by value.
    pub async fn lookup(&self, token: &str) -> Result<RefreshToken, AuthError> {
        self.repo
            .find_by_token(token)
            .await?
            .ok_or(AuthError::UnknownRefreshToken)
    }

    /// Looks up a token and checks it may still mint access tokens.
    ///
    /// Revocation is checked before expiry.
    pub async fn authorize(&self, token: &str) -> Result<RefreshToken, AuthError> {
        let record = self.lookup(token).await?;

        match record.state_at(self.clock.now()) {
            RefreshTokenState::Active => Ok(record),
            state => {
                info!(user_id = %record.user_id, state = %state, "Refresh token rejected");
                Err(AuthError::RevokedOrExpired(state))
            }
        }
    }

    /// Revokes a token.
    ///
    /// Returns `true` if this call revoked it, `false` if it was unknown or
    /// already revoked. Neither case is an error.
    pub async fn revoke(&self, token: &str) -> Result<bool, AuthError> {
        let revoked = self.repo.revoke(token, self.clock.now()).await?;
        if revoked {
            info!("Refresh token revoked");
        } else {
            debug!("Revoke requested for unknown or already revoked refresh token");
        }
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::memory::MemoryRefreshTokenStore;
    use async_trait::async_trait;
    use chirpy_core::error::{AppError, ErrorKind};
    use chirpy_core::traits::ManualClock;
    use chrono::{DateTime, TimeZone, Utc};

    fn setup() -> (RefreshTokenService, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        let service = RefreshTokenService::new(
            Arc::new(MemoryRefreshTokenStore::new()),
            Arc::new(clock.clone()),
        );
        (service, clock)
    }

    #[tokio::test]
    async fn test_create_sets_expiry() {
        let (service, clock) = setup();
        let owner = UserId::new();

        let record = service.create(owner, Duration::days(60)).await.unwrap();
        assert_eq!(record.user_id, owner);
        assert_eq!(record.token.len(), 64);
        assert_eq!(record.created_at, clock.now());
        assert_eq!(record.expires_at, clock.now() + Duration::days(60));
        assert!(record.revoked_at.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_ttl() {
        let store = MemoryRefreshTokenStore::new();
        let service = RefreshTokenService::new(
            Arc::new(store.clone()),
            Arc::new(ManualClock::default()),
        );

        let err = service.create(UserId::new(), Duration::MAX).await.unwrap_err();
        assert!(matches!(err, AuthError::LifetimeOutOfRange(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_unknown() {
        let (service, _) = setup();
        let err = service.lookup("deadbeef").await.unwrap_err();
        assert!(matches!(err, AuthError::UnknownRefreshToken));
    }

    #[tokio::test]
    async fn test_authorize_active_then_expired() {
        let (service, clock) = setup();
        let record = service.create(UserId::new(), Duration::days(60)).await.unwrap();

        clock.advance(Duration::days(60));
        assert!(service.authorize(&record.token).await.is_ok());

        clock.advance(Duration::seconds(1));
        let err = service.authorize(&record.token).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::RevokedOrExpired(RefreshTokenState::Expired)
        ));
    }

    #[tokio::test]
    async fn test_revoked_token_never_authorizes() {
        let (service, clock) = setup();
        let record = service.create(UserId::new(), Duration::days(60)).await.unwrap();

        assert!(service.revoke(&record.token).await.unwrap());
        assert!(!service.revoke(&record.token).await.unwrap());

        let err = service.authorize(&record.token).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::RevokedOrExpired(RefreshTokenState::Revoked)
        ));

        // Still revoked, not expired, once the expiry has also passed.
        clock.advance(Duration::days(90));
        let err = service.authorize(&record.token).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::RevokedOrExpired(RefreshTokenState::Revoked)
        ));
    }

    #[tokio::test]
    async fn test_revoke_unknown_succeeds() {
        let (service, _) = setup();
        assert!(!service.revoke("never-issued").await.unwrap());
    }

    struct FailingStore;

    #[async_trait]
    impl RefreshTokenRepository for FailingStore {
        async fn create(&self, _token: RefreshToken) -> Result<RefreshToken, AppError> {
            Err(AppError::database("insert failed"))
        }

        async fn find_by_token(&self, _token: &str) -> Result<Option<RefreshToken>, AppError> {
            Err(AppError::database("select failed"))
        }

        async fn revoke(&self, _token: &str, _at: DateTime<Utc>) -> Result<bool, AppError> {
            Err(AppError::database("update failed"))
        }
    }

    #[tokio::test]
    async fn test_store_errors_pass_through() {
        let service = RefreshTokenService::new(Arc::new(FailingStore), Arc::new(ManualClock::default()));

        match service.create(UserId::new(), Duration::days(1)).await {
            Err(AuthError::Store(e)) => {
                assert_eq!(e.kind, ErrorKind::Database);
                assert_eq!(e.message, "insert failed");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            service.authorize("tok").await,
            Err(AuthError::Store(_))
        ));
        assert!(matches!(service.revoke("tok").await, Err(AuthError::Store(_))));
    }
}
