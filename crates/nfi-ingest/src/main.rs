//! NFI Ingest - Main entry point

use anyhow::Result;
use nfi_common::logging::{init_logging, LogConfig};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing::info;

use nfi_ingest::{
    api::{create_router, AppState},
    config::Config,
    dispatcher::NotificationDispatcher,
    ingestor::BatchIngestor,
    retriever::S3Retriever,
    store::DynamoStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("nfi-ingest".to_string())
        .filter_directives("nfi_ingest=debug,tower_http=debug".to_string())
        .build();

    // Environment variables take precedence
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    info!("Starting NFI ingest service");

    // Load configuration
    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    // Initialize AWS clients; retrieval and store backends live for
    // the process lifetime.
    let shared = config.aws.load().await;
    let store = Arc::new(DynamoStore::new(&shared, config.aws.table.clone()));
    let retriever = Arc::new(S3Retriever::new(&shared, config.aws.path_style));
    info!("AWS clients initialized (table: {})", config.aws.table);

    // Wire the pipeline
    let dispatcher = NotificationDispatcher::new(retriever, BatchIngestor::new(store));
    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    let app = create_router(state);

    // Create socket address
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give in-flight batches time to complete
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
