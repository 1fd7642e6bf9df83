//! Password reset service - token issuance and redemption.
//!
//! Tokens are returned to the caller directly; delivering them to the user
//! is left to whoever calls `request_reset`.

use async_trait::async_trait;
use std::sync::Arc;

use domain::{Password, PasswordResetToken};

use crate::client::UserLookup;
use crate::error::{AuthError, AuthResult};
use crate::service::ResetTokenStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Password reset service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PasswordResetService: Send + Sync {
    /// Issue a reset token for the account registered under `email`
    async fn request_reset(&self, email: &str) -> AuthResult<PasswordResetToken>;

    /// Return the token record if it exists and has not expired
    async fn validate_reset_token(&self, token: &str) -> AuthResult<PasswordResetToken>;

    /// Set a new password and consume the token
    async fn reset_password(&self, token: &str, new_password: &str) -> AuthResult<()>;
}

/// Concrete implementation of PasswordResetService.
pub struct PasswordResetManager {
    users: Arc<dyn UserLookup>,
    tokens: ResetTokenStore,
}

impl PasswordResetManager {
    pub fn new(users: Arc<dyn UserLookup>, tokens: ResetTokenStore) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl PasswordResetService for PasswordResetManager {
    async fn request_reset(&self, email: &str) -> AuthResult<PasswordResetToken> {
        let user = self
            .users
            .by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let record = self.tokens.create(user.id).await?;
        tracing::info!(user_id = %user.id, expires_at = %record.expires_at, "Password reset requested");
        Ok(record)
    }

    async fn validate_reset_token(&self, token: &str) -> AuthResult<PasswordResetToken> {
        let record = self.tokens.lookup(token).await?;
        if record.is_expired() {
            return Err(AuthError::TokenExpired);
        }
        Ok(record)
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> AuthResult<()> {
        let record = self.validate_reset_token(token).await?;
        Password::validate(new_password)?;

        let mut user = self.users.by_id(record.user_id).await?.ok_or_else(|| {
            tracing::error!(user_id = %record.user_id, "Reset token references a missing user");
            AuthError::UserNotFound
        })?;

        let password = Password::hash(new_password)?;
        user.update_password_hash(password.into_string());
        self.users.update(&user).await?;

        // The password has changed; a token left behind would allow a second reset
        match self.tokens.consume(record.id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(user_id = %user.id, "Reset token was consumed by a concurrent reset");
                return Err(AuthError::NotFound);
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    "Password updated but reset token could not be consumed"
                );
                return Err(e);
            }
        }

        tracing::info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}
