//! Static host for the built single-page application.
//!
//! Real files under the dist directory are served as-is. Every other path is
//! a client-side route and answers with `index.html`.

use crate::config::Config;
use crate::constants::INDEX_DOCUMENT;
use crate::errors::{AppError, AppResult};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Builds the router serving `dist_dir` with the SPA fallback.
pub fn router(dist_dir: &Path) -> Router {
    let index = ServeFile::new(dist_dir.join(INDEX_DOCUMENT));
    let files = ServeDir::new(dist_dir).fallback(index);

    Router::new()
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
}

/// Binds `0.0.0.0:<port>` and serves until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(config: &Config) -> AppResult<()> {
    if !config.dist_dir.join(INDEX_DOCUMENT).is_file() {
        warn!(
            "No {} in {}; client routes will answer 404",
            INDEX_DOCUMENT,
            config.dist_dir.display()
        );
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    info!("Server running on port {}", config.port);

    axum::serve(listener, router(&config.dist_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
