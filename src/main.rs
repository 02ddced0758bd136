//! surfsup - a read-only JSON API over the Hawaii climate dataset
//!
//! This is the main entry point for the surfsup application.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use surfsup::handlers::router;
use surfsup::{
    init_tracing, load_dataset, log_dataset_stats, log_error, log_timed_operation, Config, Result,
    SurfsUpError,
};

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    init_tracing(&config.log_level);

    info!("Starting surfsup v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = config.server.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime.build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    info!("Loading dataset: {:?}", config.data.database_path);

    // Open the dataset and create application state
    let app_state = log_timed_operation("data_load", load_dataset(config.clone()))
        .await
        .map_err(|e| {
            log_error(&e, "Failed to load dataset");
            e
        })?;

    // Validate the application state
    app_state.validate().map_err(|e| {
        log_error(&e, "Invalid application state");
        e
    })?;

    log_dataset_stats(&app_state.dataset);

    // Wrap in Arc for sharing
    let state = Arc::new(app_state);

    let app = router(state);

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| SurfsUpError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    info!("Server is ready to accept connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SurfsUpError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
