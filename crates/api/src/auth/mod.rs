//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT bearer-token generation and validation.
//! - [`gate`] -- The capability gate turning a token and a required role into claims.

pub mod gate;
pub mod jwt;
pub mod password;
