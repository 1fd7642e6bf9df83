//! Auth Service Library
//!
//! Credential checks, access tokens and password resets. Users are reached
//! through the `UserLookup` contract; reset tokens are kept in their own
//! repository.

pub mod client;
pub mod config;
pub mod error;
pub mod repository;
pub mod service;
pub mod token;

pub use config::{AuthServiceConfig, EnvSecretProvider, SecretProvider, SigningSecret};
pub use error::{AuthError, AuthResult, TokenError};
pub use token::{AuthClaims, TokenSigner};
