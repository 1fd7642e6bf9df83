//! Authentication service business logic.

mod auth_service;
mod password_reset_service;
mod reset_token_store;

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
pub use auth_service::{AuthService, Authenticator, TokenResponse};
#[cfg(any(test, feature = "test-utils"))]
pub use password_reset_service::MockPasswordResetService;
pub use password_reset_service::{PasswordResetManager, PasswordResetService};
pub use reset_token_store::ResetTokenStore;
