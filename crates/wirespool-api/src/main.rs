//! wirespool-api - HTTP API server for the wire remaining-length calculator.

use std::sync::Arc;

use tracing::info;

use wirespool_api::telemetry::{init_tracing, LogConfig};
use wirespool_api::{build_router, AppState, ServerConfig, StorageBackend};
use wirespool_core::{CatalogScope, WireTypeRepository};
use wirespool_db::{connect_postgres, MemCatalogStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_config = LogConfig::from_env();
    let _log_guard = init_tracing(&log_config);
    info!(
        log_format = ?log_config.format,
        log_file = %log_config
            .file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(stdout)".to_string()),
        "Logging initialized"
    );

    let config = ServerConfig::from_env()?;

    let catalog: Arc<dyn WireTypeRepository> = match &config.backend {
        StorageBackend::Memory => Arc::new(MemCatalogStore::new()),
        StorageBackend::Postgres { database_url, pool } => {
            let store = connect_postgres(database_url, pool.clone()).await?;
            store.migrate().await?;
            info!(subsystem = "db", op = "migrate", "Database migrations complete");
            // Defaults are shared rows, so one seed covers every scope
            store.seed_defaults(&CatalogScope::Shared).await?;
            Arc::new(store)
        }
    };

    info!(
        backend = config.backend.name(),
        scope_mode = ?config.scope_mode,
        max_body_size = config.max_body_size,
        "Catalog store ready"
    );

    let state = AppState::new(catalog, config.scope_mode);
    let app = build_router(state, &config);

    // Start server
    let addr = config.bind_addr()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
