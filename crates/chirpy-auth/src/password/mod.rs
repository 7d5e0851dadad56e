//! Password hashing and verification.

pub mod hasher;

pub use hasher::{PasswordHasher, check_password_hash, hash_password};
