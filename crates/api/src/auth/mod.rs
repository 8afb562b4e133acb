//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Session tokens: signed access JWTs and opaque refresh tokens.

pub mod jwt;
pub mod password;
