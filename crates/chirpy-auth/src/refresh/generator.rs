//! Cryptographically secure refresh token generation.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::AuthError;

/// Refresh token size in bytes (32 bytes = 256 bits of entropy).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generates a new opaque refresh token.
///
/// The value is 256 bits from the OS entropy source, hex-encoded to 64
/// characters. It carries no user data.
pub fn make_refresh_token() -> Result<String, AuthError> {
    let mut buffer = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut buffer)
        .map_err(|e| AuthError::RandomnessFailure(e.to_string()))?;
    Ok(hex::encode(buffer))
}
