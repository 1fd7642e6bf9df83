//! Auth service configuration.

use std::sync::Arc;

use chrono::Duration;
use common::{env_parse_or, ConfigError};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_RESET_TOKEN_TTL_MINUTES, MIN_JWT_SECRET_LENGTH};

/// Used only by debug builds when `JWT_SECRET` is unset.
#[cfg(debug_assertions)]
const DEV_JWT_SECRET: &str = "dev-only-jwt-secret-change-me-in-production-0000";

/// Symmetric key for signing and verifying access tokens.
///
/// Immutable once built; cloning shares the same bytes.
#[derive(Clone)]
pub struct SigningSecret(Arc<[u8]>);

impl SigningSecret {
    /// Wrap a secret, rejecting anything shorter than the minimum length.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let bytes = secret.as_ref();
        if bytes.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {} characters", MIN_JWT_SECRET_LENGTH),
            });
        }
        Ok(Self(Arc::from(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

/// Source of the signing secret, read once at startup.
pub trait SecretProvider: Send + Sync {
    fn signing_secret(&self) -> Result<SigningSecret, ConfigError>;
}

/// Reads the secret from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    key: &'static str,
}

impl EnvSecretProvider {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new("JWT_SECRET")
    }
}

impl SecretProvider for EnvSecretProvider {
    fn signing_secret(&self) -> Result<SigningSecret, ConfigError> {
        match std::env::var(self.key) {
            Ok(secret) => SigningSecret::new(secret),
            #[cfg(debug_assertions)]
            Err(_) => {
                tracing::warn!(
                    "{} is not set, using the development secret. Never do this in production.",
                    self.key
                );
                SigningSecret::new(DEV_JWT_SECRET)
            }
            #[cfg(not(debug_assertions))]
            Err(_) => Err(ConfigError::Missing("JWT_SECRET")),
        }
    }
}

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Secret for signing tokens (min 32 characters)
    pub secret: SigningSecret,
    /// Access token lifetime in hours
    pub token_ttl_hours: i64,
    /// Password reset token lifetime in minutes
    pub reset_token_ttl_minutes: i64,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_provider(&EnvSecretProvider::default())
    }

    /// Load lifetimes from the environment and the secret from `provider`.
    pub fn from_provider(provider: &dyn SecretProvider) -> Result<Self, ConfigError> {
        let token_ttl_hours = env_parse_or("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS)?;
        let reset_token_ttl_minutes =
            env_parse_or("RESET_TOKEN_TTL_MINUTES", DEFAULT_RESET_TOKEN_TTL_MINUTES)?;

        if token_ttl_hours <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_HOURS",
                reason: "must be positive".to_string(),
            });
        }
        if reset_token_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "RESET_TOKEN_TTL_MINUTES",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            secret: provider.signing_secret()?,
            token_ttl_hours,
            reset_token_ttl_minutes,
        })
    }

    /// Build a configuration with default lifetimes around an explicit secret.
    pub fn with_secret(secret: SigningSecret) -> Self {
        Self {
            secret,
            token_ttl_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            reset_token_ttl_minutes: DEFAULT_RESET_TOKEN_TTL_MINUTES,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.token_ttl_hours)
    }

    pub fn reset_token_ttl(&self) -> Duration {
        Duration::minutes(self.reset_token_ttl_minutes)
    }
}
