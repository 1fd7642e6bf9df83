//! Authentication service - registration, login and token checks.
//!
//! Credentials are checked through the domain `Password` value object and
//! tokens come from the injected `TokenSigner`.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;

use common::StoreError;
use domain::{Password, User, TOKEN_TYPE_BEARER};

use crate::client::UserLookup;
use crate::error::{AuthError, AuthResult};
use crate::token::{AuthClaims, TokenSigner};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Verified against when the email is unknown, so both failure paths cost
/// one argon2 verification.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::hash("dummy-password-for-timing").ok());

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user with the default role
    async fn register(&self, email: String, password: String, name: String) -> AuthResult<User>;

    /// Check credentials and issue an access token
    async fn authenticate(&self, email: &str, password: &str)
        -> AuthResult<(User, TokenResponse)>;

    /// Verify a token and return its claims
    fn validate(&self, token: &str) -> AuthResult<AuthClaims>;

    /// Verify a token and return its role claim
    fn extract_role_claim(&self, token: &str) -> AuthResult<String>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserLookup>,
    signer: TokenSigner,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserLookup>, signer: TokenSigner) -> Self {
        Self { users, signer }
    }

    /// Generate an access token for a user
    fn generate_token(&self, user: &User) -> AuthResult<TokenResponse> {
        let claims = AuthClaims::new(user.id, user.email.clone(), Some(user.role.to_string()));
        let access_token = self.signer.issue(claims)?;

        Ok(TokenResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.signer.ttl().num_seconds(),
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, email: String, password: String, name: String) -> AuthResult<User> {
        Password::validate(&password)?;

        if self.users.by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = Password::hash(&password)?.into_string();
        let user = User::new(email, password_hash, name);

        // A concurrent registration can still win the unique index
        let created = self.users.create(&user).await.map_err(|e| match e {
            StoreError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Store(other),
        })?;

        tracing::info!(user_id = %created.id, "User registered");
        Ok(created)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<(User, TokenResponse)> {
        let Some(user) = self.users.by_email(email).await? else {
            if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
                let _ = dummy.verify(password);
            }
            tracing::debug!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let stored = Password::from_hash(user.password_hash.as_str());
        if !stored.verify(password)? {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.generate_token(&user)?;
        tracing::info!(user_id = %user.id, "User authenticated");
        Ok((user, token))
    }

    fn validate(&self, token: &str) -> AuthResult<AuthClaims> {
        Ok(self.signer.verify(token)?)
    }

    fn extract_role_claim(&self, token: &str) -> AuthResult<String> {
        self.validate(token)?
            .role
            .ok_or(AuthError::MissingClaim("role"))
    }
}
