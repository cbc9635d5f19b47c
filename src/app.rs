use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::{AppState, create_router};
use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::AppError;
use crate::provider::{DataProvider, HttpDocumentStore};

/// Wires the cache, the document store client and the router together.
pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let provider: Arc<dyn DataProvider> = Arc::new(HttpDocumentStore::from_config(config)?);
    let cache = CacheStore::new(Duration::from_secs(config.cache_ttl_seconds));
    Ok(AppState::new(cache, provider, config.season))
}

/// Serves the API on the configured address until Ctrl+C or SIGTERM.
pub async fn run_server(config: &Config) -> Result<(), AppError> {
    let addr: SocketAddr = config.bind_address.parse()?;
    let state = build_state(config)?;
    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(
        "Serving on http://{} (store: {}, season: {}, cache TTL: {}s)",
        addr, config.api_domain, config.season, config.cache_ttl_seconds
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
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
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
