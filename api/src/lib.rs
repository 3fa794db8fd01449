//! HTTP layer for the ScrewSavvy backend.
//!
//! One inbound route: `POST /chat-query`. The handler delegates to the
//! query pipeline and shapes the uniform success/failure responses; all
//! backend wiring happens once at startup in [`core::app_state::AppState`].

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod routes;

use axum::{Router, routing::post};
use tokio::signal;
use tracing::info;

pub use error_handler::AppError;

use crate::core::app_state::AppState;
use crate::routes::chat::chat_query_route::chat_query;

/// Bind the listener and serve until Ctrl+C.
///
/// # Errors
/// [`AppError::Build`] when the backend clients cannot be constructed from
/// the environment, [`AppError::Bind`]/[`AppError::Server`] for socket
/// problems.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);

    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".into());

    let app = Router::new()
        .route("/chat-query", post(chat_query))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(target: "api", address = %host_url, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
