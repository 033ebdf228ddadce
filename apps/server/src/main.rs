//! Daypack server binary.

use std::net::SocketAddr;

use daypack_server::{config::Config, config::StoreBackend, create_app, create_state, init_tracing};
use record_store::{MemoryStore, RecordStore, SqliteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!(backend = %config.backend, "Starting Daypack server");

    // The storage backend is picked once here and injected into the router;
    // it is never swapped at runtime.
    match config.backend {
        StoreBackend::Memory => serve(config, MemoryStore::new()).await,
        StoreBackend::Sqlite => {
            let store = SqliteStore::connect(&config.database_url).await?;
            serve(config, store).await
        }
    }
}

async fn serve<S: RecordStore + 'static>(config: Config, store: S) -> anyhow::Result<()> {
    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    // Create application state and router
    let state = create_state(config, store);
    let app = create_app(state);

    tracing::info!(addr = %addr, "Server listening");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
