//! Bookshelf HTTP Service
//!
//! Serves authors and books over HTTP with paginated listing and a
//! multi-criteria book search.

use tokio::net::TcpListener;
use tracing::info;

use bookshelf_service::{
    config::{AppConfig, DatabaseConfig},
    create_memory_app,
    error::AppResult,
    tracing::tracer::Tracer,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::get()?;

    Tracer::install(config)?;

    info!(
        "Starting {} v{}",
        config.distribution.name,
        config.distribution.version.as_deref().unwrap_or("unknown"),
    );

    start(config).await?;

    Ok(())
}

async fn start(config: &AppConfig) -> AppResult<()> {
    let app = match config.database {
        DatabaseConfig::Memory => create_memory_app(config.pagination),
    };

    let listener = TcpListener::bind(config.server.http_address).await?;
    info!("HTTP server started at {}", config.server.http_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
