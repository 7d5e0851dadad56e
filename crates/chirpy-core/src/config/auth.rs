//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted access token lifetime (30 days).
pub const MAX_ACCESS_TOKEN_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Longest accepted refresh token lifetime (10 years).
pub const MAX_REFRESH_TOKEN_TTL_DAYS: u64 = 3650;

/// Authentication and credential configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access token signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token TTL in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_days: u64,
    /// Clock-skew tolerance applied to `exp` and `iat` checks.
    #[serde(default)]
    pub jwt_leeway_seconds: u64,
    /// Report unknown login identities as a credential mismatch (401)
    /// instead of not-found (404).
    #[serde(default)]
    pub conceal_unknown_users: bool,
    /// Argon2id memory cost in KiB.
    #[serde(default = "default_memory_kib")]
    pub password_memory_kib: u32,
    /// Argon2id iteration count.
    #[serde(default = "default_iterations")]
    pub password_iterations: u32,
    /// Argon2id degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub password_parallelism: u32,
}

impl AuthConfig {
    /// Creates a configuration with the given secret and default settings.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Self::default()
        }
    }

    /// Checks that the configuration can be used to sign and verify tokens.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (CHIRPY__AUTH__JWT_SECRET)",
            ));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&self.access_token_ttl_seconds) {
            return Err(AppError::configuration(format!(
                "auth.access_token_ttl_seconds must be between 1 and {MAX_ACCESS_TOKEN_TTL_SECONDS}"
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_TTL_DAYS).contains(&self.refresh_token_ttl_days) {
            return Err(AppError::configuration(format!(
                "auth.refresh_token_ttl_days must be between 1 and {MAX_REFRESH_TOKEN_TTL_DAYS}"
            )));
        }
        if self.password_iterations == 0 || self.password_parallelism == 0 {
            return Err(AppError::configuration(
                "auth.password_iterations and auth.password_parallelism must be greater than zero",
            ));
        }
        // Argon2 requires at least 8 KiB per lane.
        if self.password_memory_kib < 8 * self.password_parallelism {
            return Err(AppError::configuration(format!(
                "auth.password_memory_kib must be at least {}",
                8 * self.password_parallelism
            )));
        }
        Ok(())
    }

    /// Access token lifetime.
    ///
    /// Saturates at [`chrono::Duration::MAX`] for values that
    /// [`validate`](Self::validate) would reject.
    pub fn access_token_ttl(&self) -> chrono::Duration {
        i64::try_from(self.access_token_ttl_seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    /// Refresh token lifetime.
    ///
    /// Saturates like [`access_token_ttl`](Self::access_token_ttl).
    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        i64::try_from(self.refresh_token_ttl_days)
            .ok()
            .and_then(chrono::Duration::try_days)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_days: default_refresh_ttl(),
            jwt_leeway_seconds: 0,
            conceal_unknown_users: false,
            password_memory_kib: default_memory_kib(),
            password_iterations: default_iterations(),
            password_parallelism: default_parallelism(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .field("jwt_leeway_seconds", &self.jwt_leeway_seconds)
            .field("conceal_unknown_users", &self.conceal_unknown_users)
            .field("password_memory_kib", &self.password_memory_kib)
            .field("password_iterations", &self.password_iterations)
            .field("password_parallelism", &self.password_parallelism)
            .finish()
    }
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    60
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
