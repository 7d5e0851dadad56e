//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use chirpy_core::config::AuthConfig;

use crate::error::AuthError;

/// Handles password hashing and verification using Argon2id.
///
/// Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$digest`)
/// that embed their own parameters, so changing the configured cost only
/// affects newly created hashes.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Cost parameters for new hashes.
    params: Params,
}

impl PasswordHasher {
    /// Creates a hasher with the library's default Argon2id parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Creates a hasher from the configured cost parameters.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.password_memory_kib,
            config.password_iterations,
            config.password_parallelism,
            None,
        )
        .map_err(|e| AuthError::HashingFailure(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password using Argon2id with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingFailure(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not. The
    /// digest is recomputed with the parameters embedded in `hash` and
    /// compared in constant time.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::HashingFailure(format!("Invalid password hash format: {e}")))?;

        match self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingFailure(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hashes `password` with default Argon2id parameters.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    PasswordHasher::new().hash_password(password)
}

/// Checks `password` against a stored hash string.
pub fn check_password_hash(password: &str, hash: &str) -> Result<bool, AuthError> {
    PasswordHasher::new().verify_password(password, hash)
}
