//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

/// Fields every new book must carry, whatever the entry path
pub const REQUIRED_FIELDS: &[&str] = &["title", "author"];

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books, filtered when `query` has non-whitespace content
    pub async fn list_books(&self, query: Option<&str>) -> AppResult<Vec<Book>> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(needle) => self.repository.books.search(needle).await,
            None => self.repository.books.list_all().await,
        }
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.find(id).await
    }

    /// Create a book once every field in `required` is present and non-blank.
    /// Title and author are stored trimmed.
    pub async fn create_book(&self, mut data: CreateBook, required: &[&'static str]) -> AppResult<Book> {
        let missing = data.missing_fields(required);
        if !missing.is_empty() {
            return Err(AppError::missing_fields(missing));
        }

        data.title = data.title.map(|t| t.trim().to_string());
        data.author = data.author.map(|a| a.trim().to_string());

        let book = self.repository.books.insert(&data).await?;
        tracing::info!(book_id = book.id, title = %book.title, "Book created");
        Ok(book)
    }

    /// Partial update. A missing book wins over validation errors.
    pub async fn update_book(&self, id: i64, mut data: UpdateBook) -> AppResult<Book> {
        self.repository.books.find(id).await?;

        let blank = data.blank_required_fields();
        if !blank.is_empty() {
            return Err(AppError::missing_fields(blank));
        }

        data.title = data.title.map(|t| t.trim().to_string());
        data.author = data.author.map(|a| a.trim().to_string());

        let book = self.repository.books.update(id, &data).await?;
        tracing::info!(book_id = id, "Book updated");
        Ok(book)
    }

    /// Delete a book. Returns `false` when it did not exist.
    pub async fn delete_book(&self, id: i64) -> AppResult<bool> {
        let deleted = self.repository.books.delete(id).await?;
        if deleted {
            tracing::info!(book_id = id, "Book deleted");
        } else {
            tracing::debug!(book_id = id, "Delete requested for unknown book");
        }
        Ok(deleted)
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
