//! Access token encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, TOKEN_ISSUER};
pub use decoder::{JwtDecoder, validate_jwt};
pub use encoder::{AccessToken, JwtEncoder, make_jwt};
