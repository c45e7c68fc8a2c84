//! HTTP surface
//!
//! Exposes the orchestrator over axum:
//! - `POST /analyze` and `POST /api/analyze`
//! - `GET /health`
//!
//! Every response carries an `x-request-id` header.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::REQUEST_ID_HEADER;
pub use state::AppState;

use crate::anonymization::Orchestrator;
use crate::domain::{Result, VeilError};
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    routes::routes()
        .layer(middleware::from_fn(routes::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until `shutdown` flips to `true`
///
/// In-flight requests are allowed to finish before this returns.
///
/// # Errors
///
/// Returns [`VeilError::Server`] if the address cannot be bound or the
/// server fails.
pub async fn serve(
    bind: SocketAddr,
    orchestrator: Orchestrator,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| VeilError::Server(format!("Failed to bind {bind}: {e}")))?;

    serve_listener(listener, orchestrator, shutdown).await
}

/// Serve on an already bound listener
pub async fn serve_listener(
    listener: TcpListener,
    orchestrator: Orchestrator,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let app = build_router(Arc::new(AppState::new(orchestrator)));

    let address = listener.local_addr()?;
    tracing::info!(address = %address, "Veil listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            tracing::info!("Shutdown requested, draining in-flight requests");
        })
        .await
        .map_err(|e| VeilError::Server(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}
