//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification and strength rules.
//! - [`jwt`] -- JWT access tokens and opaque refresh tokens.

pub mod jwt;
pub mod password;
