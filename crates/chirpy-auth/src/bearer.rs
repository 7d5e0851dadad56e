//! Bearer credential extraction from the `Authorization` header.

use crate::error::AuthError;

/// Exact, case-sensitive prefix of a bearer credential.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authorization` header value.
///
/// An absent header and an empty header are both `MissingHeader`. The
/// remainder after the prefix is returned as-is, without trimming.
pub fn get_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingHeader),
    };

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedHeader)?;

    if token.is_empty() {
        return Err(AuthError::EmptyToken);
    }

    Ok(token)
}
