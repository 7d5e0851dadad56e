//! In-memory refresh token store for tests and single-node deployments.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use chirpy_core::error::AppError;
use chirpy_core::traits::RefreshTokenRepository;
use chirpy_core::types::RefreshToken;

/// DashMap-backed [`RefreshTokenRepository`].
///
/// Each operation locks only the shard holding the token, so create,
/// lookup, and revoke are atomic per token and a revoke is visible to
/// every lookup that starts after it returns.
#[derive(Debug, Clone, Default)]
pub struct MemoryRefreshTokenStore {
    /// Records keyed by opaque token value.
    tokens: Arc<DashMap<String, RefreshToken>>,
}

impl MemoryRefreshTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens, in any state.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the store holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenStore {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, AppError> {
        match self.tokens.entry(token.token.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Refresh token already exists")),
            Entry::Vacant(slot) => {
                slot.insert(token.clone());
                Ok(token)
            }
        }
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        Ok(self.tokens.get(token).map(|entry| entry.value().clone()))
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<bool, AppError> {
        let Some(mut entry) = self.tokens.get_mut(token) else {
            return Ok(false);
        };

        if entry.revoked_at.is_some() {
            debug!("Refresh token already revoked");
            return Ok(false);
        }

        entry.revoked_at = Some(revoked_at);
        entry.updated_at = revoked_at;
        Ok(true)
    }
}
