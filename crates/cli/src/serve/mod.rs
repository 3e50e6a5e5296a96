//! `sustainiq serve` -- HTTP JSON API for snapshot scoring.
//!
//! Exposes the scoring function and the submission store as an async HTTP
//! service using `axum` + `tokio`.
//!
//! Endpoints:
//! - GET  /api/health     - Liveness payload
//! - POST /api/snapshot   - Validate, score, record; returns the result
//! - GET  /api/snapshots  - Every recorded submission, newest first
//!
//! All responses use Content-Type: application/json, including bodies
//! over the 1 MB limit (413). CORS is permissive: the form is served from
//! another origin. A snapshot body is only parsed when the request declares
//! `application/json`; any other body reads as `{}` and fails validation.
//!
//! Each submission is a read-modify-write of the whole store document with
//! no lock held across it, so two submissions racing each other can lose one.

mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use sustainiq_storage::{IdGenerator, SubmissionStore};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use self::handlers::{
    handle_create_snapshot, handle_health, handle_list_snapshots, handle_not_found,
};
use self::state::AppState;

/// Listening port when neither `--port` nor `PORT` is given.
pub(crate) const DEFAULT_PORT: u16 = 3001;

/// Maximum request body size: 1 MB.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Errors that stop the server.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({"error": message})))
}

/// Build the application router over `store`.
pub(crate) fn build_router(
    store: Arc<dyn SubmissionStore>,
    ids: Box<dyn IdGenerator>,
) -> Router {
    let state = Arc::new(AppState::new(store, ids));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/snapshot", post(handle_create_snapshot))
        .route("/api/snapshots", get(handle_list_snapshots))
        .fallback(handle_not_found)
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server on `port` and run until Ctrl+C or SIGTERM.
pub(crate) async fn start_server(
    port: u16,
    store: Arc<dyn SubmissionStore>,
    ids: Box<dyn IdGenerator>,
) -> Result<(), ServeError> {
    let app = build_router(store, ids);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    tracing::info!("SustainIQ backend listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

/// Wait for Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
