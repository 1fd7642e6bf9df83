//! HTTP API Library
//!
//! Exposes registration, login, password reset and profile management over
//! REST, backed by the user and auth services.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use auth_service_lib::repository::ResetTokenRecords;
use user_service_lib::infra::Database;
use user_service_lib::repository::UserStore;

use crate::config::ApiConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect to the database, apply migrations and serve HTTP until shutdown.
pub async fn run_server(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Arc::new(Database::connect(&config.database).await?);

    let users = Arc::new(UserStore::new(db.get_connection()));
    let reset_tokens = Arc::new(ResetTokenRecords::new(db.get_connection()));
    let state = AppState::from_repositories(users, reset_tokens, &config.auth, Some(db));

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server.addr().parse()?;
    info!("{} listening on {}", config.server.service_name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
