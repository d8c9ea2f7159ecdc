//! HTTP server initialization and runtime setup.
//!
//! Connects the configured store, wires services into [`AppState`] and runs
//! the Axum server until Ctrl+C or SIGTERM.

use crate::application::services::LinkSettings;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkStore;
use crate::infrastructure::store::{KeySpace, MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Opens the store selected by `STORE_BACKEND`.
///
/// # Errors
///
/// Returns an error if Redis is selected and unreachable.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    let keys = KeySpace::new(config.key_prefix.clone());

    match config.store_backend {
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL or REDIS_HOST must be set when STORE_BACKEND=redis")?;
            let store = RedisStore::connect(redis_url, keys)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Connected to Redis");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new(keys)))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - the store connection fails
/// - the listen address is invalid or cannot be bound
/// - the server exits with an I/O error
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;

    let state = AppState::new(store, LinkSettings::from(&config));
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
