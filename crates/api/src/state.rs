//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::client::{UserClient, UserLookup};
use auth_service_lib::repository::ResetTokenRepository;
use auth_service_lib::service::{
    AuthService, Authenticator, PasswordResetManager, PasswordResetService, ResetTokenStore,
};
use auth_service_lib::{AuthServiceConfig, TokenSigner};
use user_service_lib::infra::Database;
use user_service_lib::repository::UserRepository;
use user_service_lib::service::{UserManager, UserService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub password_reset_service: Arc<dyn PasswordResetService>,
    pub user_service: Arc<dyn UserService>,
    /// Absent when the router runs without a database (tests)
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        password_reset_service: Arc<dyn PasswordResetService>,
        user_service: Arc<dyn UserService>,
        database: Option<Arc<Database>>,
    ) -> Self {
        Self {
            auth_service,
            password_reset_service,
            user_service,
            database,
        }
    }

    /// Wire every service on top of the two repositories.
    pub fn from_repositories(
        users: Arc<dyn UserRepository>,
        reset_tokens: Arc<dyn ResetTokenRepository>,
        config: &AuthServiceConfig,
        database: Option<Arc<Database>>,
    ) -> Self {
        let lookup: Arc<dyn UserLookup> = Arc::new(UserClient::new(users.clone()));
        let signer = TokenSigner::new(config.secret.clone(), config.token_ttl());

        let auth_service = Arc::new(Authenticator::new(lookup.clone(), signer));
        let password_reset_service = Arc::new(PasswordResetManager::new(
            lookup,
            ResetTokenStore::new(reset_tokens, config.reset_token_ttl()),
        ));
        let user_service = Arc::new(UserManager::new(users));

        Self::new(auth_service, password_reset_service, user_service, database)
    }
}
