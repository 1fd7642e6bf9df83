//! Creation, lookup and consumption of password reset tokens.

use std::sync::Arc;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use uuid::Uuid;

use domain::{PasswordResetToken, RESET_TOKEN_BYTES};

use crate::error::{AuthError, AuthResult};
use crate::repository::ResetTokenRepository;

/// Issues opaque single-use reset tokens and tracks them in a repository.
pub struct ResetTokenStore {
    repo: Arc<dyn ResetTokenRepository>,
    ttl: Duration,
}

impl ResetTokenStore {
    pub fn new(repo: Arc<dyn ResetTokenRepository>, ttl: Duration) -> Self {
        Self { repo, ttl }
    }

    /// Generate and persist a token for `user_id` expiring one TTL from now.
    pub async fn create(&self, user_id: Uuid) -> AuthResult<PasswordResetToken> {
        let record = PasswordResetToken::new(user_id, generate_token()?, Utc::now(), self.ttl);
        self.repo.insert(&record).await?;
        Ok(record)
    }

    /// Find a token by its value. Expiry is not checked here.
    pub async fn lookup(&self, token: &str) -> AuthResult<PasswordResetToken> {
        self.repo
            .find_by_token(token)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// Delete a token so it can't be used again.
    ///
    /// Idempotent; returns whether this call was the one that removed it.
    pub async fn consume(&self, id: Uuid) -> AuthResult<bool> {
        Ok(self.repo.delete(id).await?)
    }
}

/// Random bytes from the OS RNG, hex encoded.
fn generate_token() -> AuthResult<String> {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AuthError::Internal(format!("Random source unavailable: {}", e)))?;
    Ok(hex::encode(bytes))
}
