//! One-off setup: creates the SQLite database file and the `books` table.

use anyhow::Context;

use bookshelf_server::{config::AppConfig, init_tracing, repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    let pool = repository::initialize(&config.database)
        .await
        .with_context(|| format!("Failed to initialize database {}", config.database.url))?;
    pool.close().await;

    tracing::info!("Database and tables created successfully");
    println!("Database path: {}", config.database.url);

    Ok(())
}
