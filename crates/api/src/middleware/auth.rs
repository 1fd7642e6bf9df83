//! Authentication middleware.
//!
//! Token checks are delegated to the auth service; this layer only pulls the
//! bearer token out of the request.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{UserRole, BEARER_TOKEN_PREFIX, ROLE_ADMIN};

use crate::state::AppState;

/// Current authenticated user extracted from the token claims.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// Check if user has admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Allow admins through, reject everyone else.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Validate the bearer token and attach a `CurrentUser` to the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = state.auth_service.validate(bearer_token(request.headers())?)?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
        role: claims
            .role
            .as_deref()
            .map(UserRole::from)
            .unwrap_or(UserRole::User),
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Reject requests whose token does not carry the admin role claim.
pub async fn require_admin_role(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let role = state
        .auth_service
        .extract_role_claim(bearer_token(request.headers())?)?;

    if role != ROLE_ADMIN {
        tracing::debug!(role = %role, "Admin route refused");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_TOKEN_PREFIX))
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
