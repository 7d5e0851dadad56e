//! Session flows: login, refresh, revoke, and authenticated requests.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
