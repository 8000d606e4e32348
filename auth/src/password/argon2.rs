use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way credential hasher backed by Argon2id.
///
/// Stateless: every hash carries its own salt and cost parameters in PHC
/// string form, so any instance can verify a hash produced by any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext secret for storage.
    ///
    /// A fresh random salt is drawn from the OS for every call, so hashing the
    /// same secret twice yields two different strings.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 could not complete (resource exhaustion)
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext secret against a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`, never an error. The digest comparison is
    /// constant-time.
    ///
    /// # Errors
    /// * `MalformedHash` - The stored value is not a parsable PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
