//! # chirpy-auth
//!
//! Authentication and session-token subsystem for Chirpy.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `jwt`: short-lived HS256 access tokens
//! - `bearer`: `Authorization: Bearer <token>` header parsing
//! - `refresh`: opaque refresh tokens, their lifecycle, and an in-memory store
//! - `session`: login, refresh, revoke, and authenticated-request flows
//!
//! The free functions re-exported here are the stateless entry points used
//! by request handlers; the structs carry configuration and an injected
//! [`Clock`](chirpy_core::traits::Clock).

pub mod bearer;
pub mod error;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod session;

pub use bearer::get_bearer_token;
pub use error::AuthError;
pub use jwt::{AccessToken, Claims, JwtDecoder, JwtEncoder, make_jwt, validate_jwt};
pub use password::{PasswordHasher, check_password_hash, hash_password};
pub use refresh::{MemoryRefreshTokenStore, RefreshTokenService, make_refresh_token};
pub use session::{LoginResult, SessionManager};
