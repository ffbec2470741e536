//! Bookshelf Server - Library Catalog
//!
//! Serves the HTML catalog and the JSON API over an existing SQLite database
//! (see the `create-db` binary).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use bookshelf_server::{
    api,
    config::AppConfig,
    init_tracing,
    repository::{self, Repository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);

    tracing::info!("Starting Bookshelf Server v{}", env!("CARGO_PKG_VERSION"));

    // Open the database; it must already exist
    let pool = repository::connect(&config.database)
        .await
        .with_context(|| {
            format!(
                "Failed to open database {} (run `create-db` first)",
                config.database.url
            )
        })?;

    tracing::info!(url = %config.database.url, "Connected to database");

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create repository and services
    let services = Services::new(Repository::new(pool));

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
