//! Core traits defined in `chirpy-core` and implemented by other crates
//! or by the integrating service.

pub mod clock;
pub mod refresh_token;
pub mod user;

pub use clock::{Clock, ManualClock, SystemClock};
pub use refresh_token::RefreshTokenRepository;
pub use user::UserRepository;
