//! Error type for the authentication core.
//!
//! Every failure the auth flows can produce is a distinct [`AuthError`]
//! variant so callers can branch on it; the conversion into
//! [`AppError`] decides which HTTP status each one surfaces as.

use chirpy_core::error::AppError;
use chirpy_core::types::RefreshTokenState;
use thiserror::Error;

/// Failures of hashing, token handling, header parsing, and session flows.
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Credential hashing ---
    /// The hasher could not run (bad parameters, entropy, malformed hash).
    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    /// The supplied password does not match the stored hash.
    #[error("Incorrect email or password")]
    CredentialMismatch,

    // --- Access tokens ---
    /// The token could not be parsed or is missing required claims.
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// The MAC does not match the payload under the configured secret.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The token declares a signing algorithm other than HS256.
    #[error("Unexpected token signing algorithm")]
    UnexpectedAlgorithm,

    /// The token was issued by a different service.
    #[error("Invalid token issuer")]
    InvalidIssuer,

    /// The token is at or past its expiry time.
    #[error("Token has expired")]
    Expired,

    /// The token claims to be issued later than the current time allows.
    #[error("Token issued in the future")]
    IssuedInFuture,

    /// The subject claim is not a valid user identity.
    #[error("Invalid token subject: {0}")]
    InvalidSubject(String),

    /// The token could not be signed.
    #[error("Failed to sign token: {0}")]
    SigningFailure(String),

    /// A token lifetime pushes its expiry outside the representable range.
    #[error("Token lifetime out of range: {0}")]
    LifetimeOutOfRange(String),

    // --- Bearer header ---
    /// No authorization header was supplied.
    #[error("Missing authorization header")]
    MissingHeader,

    /// The header does not start with `Bearer `.
    #[error("Malformed authorization header")]
    MalformedHeader,

    /// Nothing follows the `Bearer ` prefix.
    #[error("Missing token")]
    EmptyToken,

    // --- Refresh tokens and users ---
    /// The OS entropy source failed while generating a refresh token.
    #[error("Failed to generate refresh token: {0}")]
    RandomnessFailure(String),

    /// No refresh token with this value exists.
    #[error("Refresh token not found")]
    UnknownRefreshToken,

    /// The refresh token is revoked or past its expiry.
    #[error("Refresh token is {0}")]
    RevokedOrExpired(RefreshTokenState),

    /// No user with this login identity exists.
    #[error("Could not find user with email {0}")]
    UnknownUser(String),

    /// A persistence collaborator failed; passed through unchanged.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl AuthError {
    /// Whether this error is a server-side fault rather than a rejected request.
    pub fn is_internal(&self) -> bool {
        match self {
            AuthError::HashingFailure(_)
            | AuthError::SigningFailure(_)
            | AuthError::LifetimeOutOfRange(_)
            | AuthError::RandomnessFailure(_) => true,
            AuthError::Store(e) => e.kind.is_server_fault(),
            _ => false,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(inner) => inner,
            AuthError::HashingFailure(_)
            | AuthError::SigningFailure(_)
            | AuthError::LifetimeOutOfRange(_)
            | AuthError::RandomnessFailure(_) => AppError::internal(err.to_string()),
            AuthError::UnknownUser(_) => AppError::not_found(err.to_string()),
            _ => AppError::authentication(err.to_string()),
        }
    }
}
