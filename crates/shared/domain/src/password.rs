//! Password value object - credential hashing and verification.
//!
//! Hashes are argon2id PHC strings with a fresh salt per call, so the same
//! plaintext never produces the same stored value twice.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// Failures of the credential hasher itself.
///
/// A wrong password is not an error; `verify` reports it as `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("Password hash failed: {0}")]
    Hashing(String),

    #[error("Invalid hash format: {0}")]
    MalformedHash(String),
}

/// Password value object holding an argon2 hash.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Validate the plaintext against the password policy, then hash it.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::validate(plain_text)?;
        Self::hash(plain_text).map_err(|e| DomainError::internal(e.to_string()))
    }

    /// Check the password policy without hashing.
    pub fn validate(plain_text: &str) -> DomainResult<()> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::password(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }

    /// Hash a plaintext password with a freshly generated salt.
    pub fn hash(plain_text: &str) -> Result<Self, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| HashError::Hashing(e.to_string()))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plaintext password against this hash.
    ///
    /// Returns `Ok(false)` on mismatch and `Err` only when the stored hash
    /// cannot be parsed.
    pub fn verify(&self, plain_text: &str) -> Result<bool, HashError> {
        let parsed =
            PasswordHash::new(&self.hash).map_err(|e| HashError::MalformedHash(e.to_string()))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
