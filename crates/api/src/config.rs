//! HTTP server configuration.

use auth_service_lib::AuthServiceConfig;
use common::{ConfigError, DatabaseConfig, ServiceConfig};

/// Everything the server binary needs, loaded from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub auth: AuthServiceConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServiceConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthServiceConfig::from_env()?,
        })
    }
}
