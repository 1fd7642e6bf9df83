//! Password reset handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use auth_service_lib::AuthError;
use common::AppResult;

use crate::extractors::ValidatedJson;
use crate::state::AppState;

const GENERIC_RESET_MESSAGE: &str = "If that email exists, a reset link has been sent.";

/// Reset token request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Reset request outcome. `token` is present only when the account exists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResetRequestResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// New password submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "newpass456", min_length = 8)]
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Routes mounted under `/password-reset`
pub fn password_reset_routes() -> Router<AppState> {
    Router::new()
        .route("/request", post(request_reset))
        .route("/reset", post(reset_password))
}

/// Request a password reset token
#[utoipa::path(
    post,
    path = "/api/password-reset/request",
    tag = "Password Reset",
    request_body = ResetRequest,
    responses(
        (status = 200, description = "Request accepted", body = ResetRequestResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn request_reset(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetRequest>,
) -> AppResult<Json<ResetRequestResponse>> {
    match state
        .password_reset_service
        .request_reset(&payload.email)
        .await
    {
        Ok(record) => Ok(Json(ResetRequestResponse {
            message: "Password reset token generated.".to_string(),
            token: Some(record.token),
        })),
        // Same answer as success so the endpoint can't be used to probe accounts
        Err(AuthError::UserNotFound) => Ok(Json(ResetRequestResponse {
            message: GENERIC_RESET_MESSAGE.to_string(),
            token: None,
        })),
        Err(e) => Err(e.into()),
    }
}

/// Set a new password with a reset token
#[utoipa::path(
    post,
    path = "/api/password-reset/reset",
    tag = "Password Reset",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid or expired token, or weak password")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .password_reset_service
        .reset_password(&payload.token, &payload.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password has been reset successfully.".to_string(),
    }))
}
