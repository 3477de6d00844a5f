//! Service bootstrap: configuration, store selection, HTTP serving.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

pub mod http;

use crate::config::{Config, StoreBackend};
use crate::services::Recommender;
use crate::store::{BoltStore, GraphStore, MemoryStore};
use http::{create_router, AppState};

pub async fn start_service(config_path: &str) -> Result<()> {
    let config = match Config::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(path = config_path, error = %e, "failed to load config, using defaults");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    match config.store.backend {
        StoreBackend::Bolt => {
            let store = BoltStore::connect(
                &config.store.uri,
                &config.store.user,
                &config.store.password,
            )
            .await?;
            info!(uri = %config.store.uri, "using bolt graph store");
            serve(Arc::new(store), &config).await
        }
        StoreBackend::Memory => {
            info!("using in-memory graph store");
            serve(Arc::new(MemoryStore::new()), &config).await
        }
    }
}

async fn serve<S: GraphStore>(store: Arc<S>, config: &Config) -> Result<()> {
    let state = AppState::new(Recommender::new(store));
    let router = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install shutdown handler");
        return;
    }
    info!("shutdown signal received");
}
