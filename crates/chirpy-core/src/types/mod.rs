//! Core type definitions used across the Chirpy workspace.

pub mod id;
pub mod refresh_token;
pub mod response;
pub mod user;

pub use id::UserId;
pub use refresh_token::{RefreshToken, RefreshTokenState};
pub use response::ApiErrorResponse;
pub use user::{PublicUser, UserCredentials};
