//! # chirpy-core
//!
//! Core crate for Chirpy. Contains configuration schemas, typed
//! identifiers, the refresh-token and user records, the collaborator
//! traits the auth core depends on, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Chirpy crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
