use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use greenhouse_api::app::{create_app, AppState};
use greenhouse_api::config::{Config, StorageBackend};
use greenhouse_api::middleware::{init_metrics, logging::init_logging};
use persistence::{FileStore, KeyValueStore, MemoryStore};

fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match config.storage.backend() {
        Some(StorageBackend::Memory) => {
            info!("Using in-memory storage; nothing survives a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        Some(StorageBackend::File) | None => {
            let store = FileStore::open(&config.storage.path).with_context(|| {
                format!("Failed to open store at {}", config.storage.path.display())
            })?;
            info!("Using file storage at {}", store.path().display());
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging)?;
    init_metrics()?;

    info!("Starting Greenhouse Dashboard v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config)?;
    let addr = config.socket_addr()?;
    let state = AppState::new(config, store)?;
    let app = create_app(state);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
