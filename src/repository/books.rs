//! Books repository for database operations.
//!
//! Every mutation runs in its own transaction. A transaction that is dropped
//! before `commit` (early return through `?`) is rolled back by sqlx, so no
//! partial write survives a failed statement or commit.

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
};

const COLUMNS: &str = "id, title, author, genre, borrowed_status, year";

/// Escape LIKE wildcards so user input matches literally (with `ESCAPE '\'`)
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// All books in insertion order
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!("SELECT {COLUMNS} FROM books ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Point lookup by primary key
    pub async fn find(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {COLUMNS} FROM books WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::book_not_found(id))
    }

    /// Case-insensitive search: title starting with `needle` or author
    /// containing it anywhere.
    pub async fn search(&self, needle: &str) -> AppResult<Vec<Book>> {
        let escaped = escape_like(needle);
        let books = sqlx::query_as::<_, Book>(&format!(
            r#"
            SELECT {COLUMNS} FROM books
            WHERE title LIKE ? ESCAPE '\' OR author LIKE ? ESCAPE '\'
            ORDER BY id
            "#
        ))
        .bind(format!("{}%", escaped))
        .bind(format!("%{}%", escaped))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Insert a new book; the id is assigned by storage
    pub async fn insert(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, genre, borrowed_status, year)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.genre)
        .bind(&data.borrowed_status)
        .bind(&data.year)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Apply the fields present in `data`, leaving the rest untouched
    pub async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Book> {
        if data.is_empty() {
            return self.find(id).await;
        }

        let mut sets: Vec<&str> = Vec::new();

        macro_rules! add_field {
            ($field:expr, $name:literal) => {
                if $field.is_some() {
                    sets.push(concat!($name, " = ?"));
                }
            };
        }

        add_field!(data.title, "title");
        add_field!(data.author, "author");
        add_field!(data.genre, "genre");
        add_field!(data.borrowed_status, "borrowed_status");
        add_field!(data.year, "year");

        let query = format!(
            "UPDATE books SET {} WHERE id = ? RETURNING {COLUMNS}",
            sets.join(", ")
        );

        let mut builder = sqlx::query_as::<_, Book>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.title);
        bind_field!(data.author);
        bind_field!(data.genre);
        bind_field!(data.borrowed_status);
        bind_field!(data.year);

        let mut tx = self.pool.begin().await?;

        let book = builder
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::book_not_found(id))?;

        tx.commit().await?;
        Ok(book)
    }

    /// Delete a book. Returns `false` when no row had this id.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
