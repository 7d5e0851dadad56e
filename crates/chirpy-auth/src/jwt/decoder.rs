//! Access token validation.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use chirpy_core::config::AuthConfig;
use chirpy_core::traits::{Clock, SystemClock};
use chirpy_core::types::UserId;

use super::claims::{Claims, TOKEN_ISSUER};
use crate::error::AuthError;

/// Validates HS256 access tokens against a shared secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature, algorithm, issuer, and required-claim checks.
    validation: Validation,
    /// Clock-skew tolerance in seconds for the time checks.
    leeway_seconds: i64,
    /// Source of "now" for the time checks.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a decoder for `secret`.
    pub fn new(secret: &str, leeway_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        // Only HS256 is accepted, whatever the token header declares.
        let mut validation = Validation::new(Algorithm::HS256);
        // Time is checked against the injected clock instead.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["iss", "sub", "iat", "exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            leeway_seconds: i64::try_from(leeway_seconds).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Creates a decoder from auth configuration.
    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(&config.jwt_secret, config.jwt_leeway_seconds, clock)
    }

    /// Validates a token and returns the user it was issued to.
    ///
    /// Checks, in order:
    /// 1. Structure, algorithm, signature, issuer, required claims
    /// 2. Expiration (`now >= exp + leeway` is expired)
    /// 3. Issued-at not in the future (`iat <= now + leeway`)
    /// 4. Subject is a valid user ID
    pub fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.decode_claims(token)?;
        let now = self.clock.now();

        if claims.is_expired_at(now, self.leeway_seconds) {
            debug!(exp = claims.exp, "Rejected expired access token");
            return Err(AuthError::Expired);
        }

        if claims.is_issued_after(now, self.leeway_seconds) {
            debug!(iat = claims.iat, "Rejected access token issued in the future");
            return Err(AuthError::IssuedInFuture);
        }

        claims.user_id()
    }

    /// Verifies the signature and returns the raw claims without time checks.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(error = %e, "Access token rejected");
                match e.kind() {
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    ErrorKind::InvalidAlgorithm => AuthError::UnexpectedAlgorithm,
                    ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    _ => AuthError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

/// Validates `token` against `secret` using the wall clock and no leeway.
pub fn validate_jwt(token: &str, secret: &str) -> Result<UserId, AuthError> {
    JwtDecoder::new(secret, 0, Arc::new(SystemClock)).validate(token)
}
