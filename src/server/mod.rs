//! HTTP surface for Namunamu
//!
//! Builds the axum router over shared application state and serves it.
//! Every generation endpoint responds with a streamed
//! `200 text/plain; charset=utf-8` body on success, `400` for invalid
//! input, and `500` with a fixed plaintext message on upstream failure.

pub mod routes;
pub mod state;

pub use state::AppState;

use crate::error::Result;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/generate-recipe", post(routes::generate_recipe))
        .route("/api/generate-plan", post(routes::generate_plan))
        .route(
            "/api/generate-shopping-list",
            post(routes::generate_shopping_list),
        )
        .route("/api/analyze-health", post(routes::analyze_health))
        .route("/api/analyze-image", post(routes::analyze_image))
        .route("/api/send-email", post(routes::send_email))
        .with_state(state)
}

/// Bind and serve the router until the process exits
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `host` - Bind address
/// * `port` - Bind port
///
/// # Errors
///
/// Returns error if binding fails or the server loop errors
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
