//! Session lifecycle manager: login, refresh, revoke, and request
//! authentication flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use chirpy_core::config::AuthConfig;
use chirpy_core::traits::{Clock, RefreshTokenRepository, UserRepository};
use chirpy_core::types::{PublicUser, UserId};

use crate::bearer::get_bearer_token;
use crate::error::AuthError;
use crate::jwt::{AccessToken, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::refresh::RefreshTokenService;

/// Result of a successful login.
///
/// Serializes flat: the user's public fields plus `token` and
/// `refresh_token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// The authenticated user.
    #[serde(flatten)]
    pub user: PublicUser,
    /// Short-lived access token.
    pub token: String,
    /// Long-lived opaque refresh token.
    pub refresh_token: String,
}

/// Composes credential checks, access tokens, and refresh tokens into the
/// session flows.
///
/// Password verification runs on the calling task. Callers on a
/// latency-sensitive runtime should move [`login`](Self::login) onto a
/// blocking-friendly executor.
#[derive(Clone)]
pub struct SessionManager {
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Access token encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// Access token decoder.
    jwt_decoder: Arc<JwtDecoder>,
    /// Refresh token lifecycle.
    refresh_tokens: Arc<RefreshTokenService>,
    /// User lookup.
    user_repo: Arc<dyn UserRepository>,
    /// Auth configuration.
    auth_config: AuthConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("auth_config", &self.auth_config)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager from already-built components.
    pub fn new(
        password_hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        refresh_tokens: Arc<RefreshTokenService>,
        user_repo: Arc<dyn UserRepository>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            password_hasher,
            jwt_encoder,
            jwt_decoder,
            refresh_tokens,
            user_repo,
            auth_config,
        }
    }

    /// Wires every component from auth configuration.
    pub fn from_config(
        auth_config: AuthConfig,
        user_repo: Arc<dyn UserRepository>,
        refresh_repo: Arc<dyn RefreshTokenRepository>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthError> {
        let password_hasher = Arc::new(PasswordHasher::from_config(&auth_config)?);
        let jwt_encoder = Arc::new(JwtEncoder::from_config(&auth_config, Arc::clone(&clock)));
        let jwt_decoder = Arc::new(JwtDecoder::from_config(&auth_config, Arc::clone(&clock)));
        let refresh_tokens = Arc::new(RefreshTokenService::new(refresh_repo, clock));

        Ok(Self::new(
            password_hasher,
            jwt_encoder,
            jwt_decoder,
            refresh_tokens,
            user_repo,
            auth_config,
        ))
    }

    /// Performs the login flow:
    ///
    /// 1. Find the user by email
    /// 2. Verify the password
    /// 3. Issue an access token
    /// 4. Create and persist a refresh token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        // Step 1: Find user
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            info!("Login attempt for unknown user");
            return Err(if self.auth_config.conceal_unknown_users {
                AuthError::CredentialMismatch
            } else {
                AuthError::UnknownUser(email.to_string())
            });
        };

        // Step 2: Verify password
        let password_valid = self
            .password_hasher
            .verify_password(password, &user.hashed_password)?;

        if !password_valid {
            info!(user_id = %user.id, "Login rejected: incorrect password");
            return Err(AuthError::CredentialMismatch);
        }

        // Step 3: Access token
        let access = self.jwt_encoder.generate_access_token(user.id)?;

        // Step 4: Refresh token
        let refresh = self
            .refresh_tokens
            .create(user.id, self.auth_config.refresh_token_ttl())
            .await?;

        info!(user_id = %user.id, "Login successful");

        Ok(LoginResult {
            user: user.to_public(),
            token: access.token,
            refresh_token: refresh.token,
        })
    }

    /// Mints a new access token from a refresh token carried as a bearer
    /// credential.
    ///
    /// The refresh token is neither rotated nor extended.
    pub async fn refresh(&self, authorization: Option<&str>) -> Result<AccessToken, AuthError> {
        let bearer = get_bearer_token(authorization)?;
        let record = self.refresh_tokens.authorize(bearer).await?;

        let access = self.jwt_encoder.generate_access_token(record.user_id)?;
        info!(user_id = %record.user_id, "Access token refreshed");

        Ok(access)
    }

    /// Revokes the refresh token carried as a bearer credential.
    ///
    /// Succeeds whether or not the token existed.
    pub async fn revoke(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let bearer = get_bearer_token(authorization)?;
        self.refresh_tokens.revoke(bearer).await?;
        Ok(())
    }

    /// Validates the access token carried as a bearer credential and returns
    /// its subject.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<UserId, AuthError> {
        let bearer = get_bearer_token(authorization)?;
        let user_id = self.jwt_decoder.validate(bearer)?;
        debug!(user_id = %user_id, "Request authenticated");
        Ok(user_id)
    }
}
