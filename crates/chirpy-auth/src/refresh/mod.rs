//! Opaque refresh tokens: generation, lifecycle, and storage.

pub mod generator;
pub mod memory;
pub mod service;

pub use generator::{REFRESH_TOKEN_BYTES, make_refresh_token};
pub use memory::MemoryRefreshTokenStore;
pub use service::RefreshTokenService;
