//! Deep Identity server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deep_identity::adapters::http::{app, with_server_layers, ReviewerKey};
use deep_identity::adapters::storage::{
    FileSessionStore, InMemoryRecordStore, InMemorySessionStore, JsonFileRecordStore,
};
use deep_identity::config::{AppConfig, LogFormat, StorageBackend};
use deep_identity::ports::{RecordStore, SessionStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let catalog = match config.catalog.load() {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "Question catalog failed integrity checks");
            return Err(e.into());
        }
    };
    tracing::info!(
        childhood = catalog.childhood.len(),
        vocation = catalog.vocation.len(),
        columns = catalog.columns.len(),
        "Question catalog loaded"
    );

    let (sessions, records): (Arc<dyn SessionStore>, Arc<dyn RecordStore>) =
        match config.storage.backend {
            StorageBackend::Memory => (
                Arc::new(InMemorySessionStore::new()),
                Arc::new(InMemoryRecordStore::new()),
            ),
            StorageBackend::File => (
                Arc::new(FileSessionStore::new(config.storage.sessions_dir())),
                Arc::new(JsonFileRecordStore::new(config.storage.results_path())),
            ),
        };
    tracing::info!(backend = ?config.storage.backend, data_dir = %config.storage.data_dir.display(), "Storage ready");

    let addr = config.server.socket_addr()?;
    let reviewer_key = ReviewerKey::new(config.reviewer.key);
    let router = with_server_layers(app(catalog, sessions, records, reviewer_key), &config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter));

    if config.server.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
