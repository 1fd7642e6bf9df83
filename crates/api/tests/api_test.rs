//! Integration tests for API endpoints.
//!
//! The router runs on in-memory repositories, so no database is needed.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use api_lib::routes::create_router;
use api_lib::state::AppState;
use auth_service_lib::repository::InMemoryResetTokens;
use auth_service_lib::{AuthServiceConfig, SigningSecret};
use domain::UserRole;
use user_service_lib::repository::{InMemoryUserStore, UserRepository};

const SECRET: &str = "test-secret-key-for-testing-only-32chars";

struct TestApp {
    router: Router,
    users: Arc<InMemoryUserStore>,
}

impl TestApp {
    fn new() -> Self {
        let users = Arc::new(InMemoryUserStore::new());
        let config = AuthServiceConfig::with_secret(SigningSecret::new(SECRET).unwrap());
        let state = AppState::from_repositories(
            users.clone(),
            Arc::new(InMemoryResetTokens::new()),
            &config,
            None,
        );

        Self {
            router: create_router(state),
            users,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    async fn register(&self, email: &str, password: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/users/register",
                Some(json!({ "email": email, "password": password, "name": "Test User" })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }

    async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    async fn token_for(&self, email: &str, password: &str) -> String {
        let (status, body) = self.login(email, password).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["token"].as_str().unwrap().to_string()
    }

    async fn promote_to_admin(&self, email: &str) {
        let mut user = self.users.find_by_email(email).await.unwrap().unwrap();
        user.update_role(UserRole::Admin);
        self.users.update(&user).await.unwrap();
    }
}

// =============================================================================
// Health & docs
// =============================================================================

#[tokio::test]
async fn test_health_without_database() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "not_configured");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::GET, "/api-docs/openapi.json", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/auth/login"].is_object());
}

// =============================================================================
// Registration & login
// =============================================================================

#[tokio::test]
async fn test_register_returns_profile_without_hash() {
    let app = TestApp::new();
    let body = app.register("alice@example.com", "secret123").await;

    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("alice@example.com", "secret123").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/users/register",
            Some(json!({ "email": "alice@example.com", "password": "secret123", "name": "A" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/users/register",
            Some(json!({ "email": "alice@example.com", "password": "short", "name": "A" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_success_and_failure() {
    let app = TestApp::new();
    app.register("alice@example.com", "secret123").await;

    let (status, body) = app.login("alice@example.com", "secret123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 86400);
    assert!(body["token"].as_str().is_some());

    let (status, body) = app.login("alice@example.com", "wrongpass").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");

    let (status, _) = app.login("nobody@example.com", "secret123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Protected user routes
// =============================================================================

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, body) = app
        .send(Method::GET, "/api/users/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_get_current_user() {
    let app = TestApp::new();
    app.register("alice@example.com", "secret123").await;
    let token = app.token_for("alice@example.com", "secret123").await;

    let (status, body) = app
        .send(Method::GET, "/api/users/me", None, Some(&token))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_list_users_requires_admin_role_claim() {
    let app = TestApp::new();
    app.register("alice@example.com", "secret123").await;
    app.register("bob@example.com", "secret123").await;

    let token = app.token_for("alice@example.com", "secret123").await;
    let (status, body) = app.send(Method::GET, "/api/users", None, Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    // The role claim is read from a fresh token after promotion
    app.promote_to_admin("alice@example.com").await;
    let token = app.token_for("alice@example.com", "secret123").await;
    let (status, body) = app.send(Method::GET, "/api/users", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_get_other_user_needs_admin() {
    let app = TestApp::new();
    app.register("alice@example.com", "secret123").await;
    let bob = app.register("bob@example.com", "secret123").await;
    let bob_path = format!("/api/users/{}", bob["id"].as_str().unwrap());

    let token = app.token_for("alice@example.com", "secret123").await;
    let (status, _) = app.send(Method::GET, &bob_path, None, Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.promote_to_admin("alice@example.com").await;
    let token = app.token_for("alice@example.com", "secret123").await;
    let (status, body) = app.send(Method::GET, &bob_path, None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "bob@example.com");
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "secret123").await;
    let path = format!("/api/users/{}", alice["id"].as_str().unwrap());
    let token = app.token_for("alice@example.com", "secret123").await;

    let (status, body) = app
        .send(
            Method::PUT,
            &path,
            Some(json!({ "name": "Alice Liddell" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice Liddell");

    let (status, _) = app
        .send(Method::PUT, &path, Some(json!({ "role": "admin" })), Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_password_change_through_profile_update() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "secret123").await;
    let path = format!("/api/users/{}", alice["id"].as_str().unwrap());
    let token = app.token_for("alice@example.com", "secret123").await;

    let (status, _) = app
        .send(
            Method::PUT,
            &path,
            Some(json!({ "password": "changed-pass" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        app.login("alice@example.com", "secret123").await.0,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.login("alice@example.com", "changed-pass").await.0,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_delete_own_account() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com", "secret123").await;
    let path = format!("/api/users/{}", alice["id"].as_str().unwrap());
    let token = app.token_for("alice@example.com", "secret123").await;

    let (status, _) = app.send(Method::DELETE, &path, None, Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send(Method::GET, "/api/users/me", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Password reset
// =============================================================================

#[tokio::test]
async fn test_password_reset_flow() {
    let app = TestApp::new();
    app.register("alice@example.com", "secret123").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/password-reset/request",
            Some(json!({ "email": "alice@example.com" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let reset_token = body["token"].as_str().unwrap().to_string();
    assert_eq!(reset_token.len(), 64);

    let reset = json!({ "token": reset_token, "new_password": "newpass456" });
    let (status, _) = app
        .send(
            Method::POST,
            "/api/password-reset/reset",
            Some(reset.clone()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        app.login("alice@example.com", "secret123").await.0,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.login("alice@example.com", "newpass456").await.0,
        StatusCode::OK
    );

    // Single use
    let (status, body) = app
        .send(Method::POST, "/api/password-reset/reset", Some(reset), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_reset_request_for_unknown_email_looks_the_same() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/password-reset/request",
            Some(json!({ "email": "nobody@example.com" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("token").is_none());
    assert_eq!(
        body["message"],
        "If that email exists, a reset link has been sent."
    );
}

#[tokio::test]
async fn test_reset_with_unknown_token() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Method::POST,
            "/api/password-reset/reset",
            Some(json!({ "token": "deadbeef", "new_password": "newpass456" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Mocked services
// =============================================================================

#[tokio::test]
async fn test_login_reports_unavailable_store() {
    use auth_service_lib::service::{MockAuthService, MockPasswordResetService};
    use auth_service_lib::AuthError;
    use common::StoreError;
    use user_service_lib::service::MockUserService;

    let mut auth = MockAuthService::new();
    auth.expect_authenticate().returning(|_, _| {
        Err(AuthError::Store(StoreError::Unavailable(
            "connection refused".to_string(),
        )))
    });

    let state = AppState::new(
        Arc::new(auth),
        Arc::new(MockPasswordResetService::new()),
        Arc::new(MockUserService::new()),
        None,
    );
    let router = create_router(state);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "alice@example.com", "password": "secret123" }).to_string(),
        ))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
}
