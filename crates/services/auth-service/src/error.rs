//! Authentication error taxonomy.
//!
//! Every failure of the auth core is one of these variants; callers match on
//! them instead of inspecting messages.

use common::{AppError, StoreError};
use domain::{DomainError, HashError};
use thiserror::Error;

/// Why a bearer token was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token could not be signed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Auth core errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Token is missing the {0} claim")]
    MissingClaim(&'static str),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// No reset token with the presented value
    #[error("Reset token not found")]
    NotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Reset token has expired")]
    TokenExpired,

    #[error("Email already registered")]
    EmailTaken,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Password(msg) => AuthError::Validation(msg),
            DomainError::Internal(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::Token(e) => {
                tracing::debug!("Rejected token: {}", e);
                AppError::InvalidToken
            }
            AuthError::MissingClaim(claim) => {
                tracing::debug!("Token without {} claim", claim);
                AppError::Forbidden
            }
            AuthError::Hash(e) => AppError::Internal(e.to_string()),
            AuthError::Store(e) => AppError::from(e),
            AuthError::NotFound => AppError::bad_request("Invalid or expired reset token"),
            AuthError::TokenExpired => AppError::bad_request("Reset token has expired"),
            AuthError::UserNotFound => AppError::NotFound,
            AuthError::EmailTaken => AppError::conflict("Email"),
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_mapping() {
        let status = |err: AuthError| AppError::from(err).status().as_u16();

        assert_eq!(status(AuthError::InvalidCredentials), 401);
        assert_eq!(status(TokenError::Expired.into()), 401);
        assert_eq!(status(AuthError::MissingClaim("role")), 403);
        assert_eq!(status(AuthError::NotFound), 400);
        assert_eq!(status(AuthError::TokenExpired), 400);
        assert_eq!(status(AuthError::UserNotFound), 404);
        assert_eq!(status(AuthError::EmailTaken), 409);
        assert_eq!(status(StoreError::query("boom").into()), 500);
    }

    #[test]
    fn test_password_policy_becomes_validation() {
        let err = AuthError::from(DomainError::password("too short"));
        assert!(matches!(err, AuthError::Validation(msg) if msg == "too short"));
    }
}
