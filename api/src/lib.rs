//! HTTP surface for the filings QA backend.
//!
//! Routes:
//! - `POST /ask` — answers a question about the requested companies.
//! - `GET /health` — probes the configured model endpoints.

use std::{env, error::Error, sync::Arc};

mod core;
mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::core::app_state::AppState;
use crate::routes::{ask::ask_question_route::ask_question, health::health_route::health};

pub async fn start() -> Result<(), Box<dyn Error>> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let state = Arc::new(AppState::from_env()?);

    let app = Router::new()
        .route("/ask", post(ask_question))
        .route("/health", get(health))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&host_url).await?;
    info!("listening on {host_url}");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
