//! HTTP server initialization and runtime setup.
//!
//! Builds the store handle, wires it into the router and runs the Axum
//! server until a shutdown signal arrives.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::graphql::GraphQlClient;
use crate::infrastructure::persistence::{HasuraShortLinkRepository, MemoryShortLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the repository selected by the configuration.
///
/// The returned handle is created once and shared by every request.
///
/// # Errors
///
/// Returns an error if the Hasura backend is selected but not configured,
/// or the HTTP client cannot be built.
pub fn build_repository(config: &Config) -> Result<Arc<dyn ShortLinkRepository>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; links are lost on restart");
            Ok(Arc::new(MemoryShortLinkRepository::new()))
        }
        StoreBackend::Hasura => {
            let endpoint = config
                .hasura_endpoint
                .clone()
                .context("HASURA_ENDPOINT is not configured")?;

            let client = GraphQlClient::new(
                endpoint,
                config.admin_secret.clone(),
                config.store_timeout(),
                config.store_retry_attempts,
            )
            .context("Failed to build store client")?;
            tracing::info!("Store client ready ({})", client.endpoint());

            Ok(Arc::new(HasuraShortLinkRepository::new(Arc::new(client))))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The store client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config)?;

    if !repository.health_check().await {
        tracing::warn!("Store is not reachable at startup; requests will fail until it recovers");
    }

    let state = AppState::new(repository);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when Ctrl-C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
