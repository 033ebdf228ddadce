//! Shared helpers for page tests: an in-process server over a memory store.

use daypack_server::config::{Config, StoreBackend};
use daypack_server::{create_app, create_state};
use record_store::MemoryStore;

/// Starts the server on an ephemeral port and returns its base URL.
pub(crate) async fn spawn_server() -> String {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        backend: StoreBackend::Memory,
        database_url: String::new(),
        log_level: "info".to_string(),
    };
    let app = create_app(create_state(config, MemoryStore::new()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}
