//! # Password Hashing
//!
//! Salted Argon2 hashing and verification. Length and complexity policy is a
//! request-validation concern and is not enforced here.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to hash password: {0}")]
    Hashing(String),

    #[error("stored password hash is not a valid PHC string: {0}")]
    InvalidHash(String),
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Hashing(e.to_string()))
}

/// Verify a plaintext password against a stored Argon2 hash.
///
/// The digest comparison inside `argon2` is constant-time. A mismatch is
/// `Ok(false)`; only an unparsable stored hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::InvalidHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
