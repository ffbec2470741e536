//! Repository layer for database operations

pub mod books;

use std::{path::PathBuf, str::FromStr};

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{config::DatabaseConfig, error::AppResult};

/// Embedded schema migrations from `migrations/`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness check)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// File path behind a SQLite URL; `None` for in-memory databases
fn database_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

fn connect_options(config: &DatabaseConfig) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(&config.url)?.foreign_keys(true))
}

async fn open_pool(config: &DatabaseConfig, options: SqliteConnectOptions) -> Result<Pool<Sqlite>, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .connect_with(options)
        .await
}

/// Open an existing database. The file is never created here; run the
/// `create-db` binary first.
pub async fn connect(config: &DatabaseConfig) -> Result<Pool<Sqlite>, sqlx::Error> {
    let options = connect_options(config)?.create_if_missing(false);
    open_pool(config, options).await
}

/// Create the database file (and its directory) if needed, then apply the
/// schema migrations. Safe to run repeatedly.
pub async fn initialize(config: &DatabaseConfig) -> anyhow::Result<Pool<Sqlite>> {
    let options = connect_options(config)?.create_if_missing(true);

    if let Some(dir) = database_path(&config.url).as_deref().and_then(|p| p.parent()) {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let pool = open_pool(config, options).await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
