//! Shared helpers for integration tests

use std::sync::Arc;

use bookshelf_server::{
    api,
    config::AppConfig,
    models::{CreateBook, Year},
    repository::{self, Repository},
    services::Services,
    AppState,
};
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub repository: Repository,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Database URL for a file inside `dir` (the `data` subdirectory does not exist yet)
pub fn database_config(dir: &TempDir) -> bookshelf_server::config::DatabaseConfig {
    let mut config = AppConfig::default().database;
    config.url = format!("sqlite://{}", dir.path().join("data").join("books.db").display());
    config
}

/// Fresh, migrated database in a temporary directory
pub async fn test_repository() -> (Repository, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = repository::initialize(&database_config(&dir))
        .await
        .expect("Failed to initialize database");
    (Repository::new(pool), dir)
}

pub async fn spawn_app() -> TestApp {
    let (repository, dir) = test_repository().await;

    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(repository.clone())),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().expect("No local address"));

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client");

    TestApp {
        address,
        client,
        repository,
        _dir: dir,
    }
}

pub fn new_book(title: &str, author: &str) -> CreateBook {
    CreateBook {
        title: Some(title.to_string()),
        author: Some(author.to_string()),
        genre: Some("Fiction".to_string()),
        borrowed_status: Some("in-store".to_string()),
        year: Some(Year::from(2001)),
    }
}

/// All `set-cookie` header values of a response
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
