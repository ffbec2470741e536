//! HTML front end.
//!
//! Every form submission answers with a redirect back to a read view; problems
//! are reported to the user through [`notice`] on the next page.

pub mod notice;
pub mod views;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
    api::BookId,
    error::AppError,
    models::book::{BookQuery, CreateBook, UpdateBook, Year},
    services::catalog::REQUIRED_FIELDS,
    AppState,
};

use notice::Notice;

/// HTML routes under `/books`
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/books") }))
        .route("/books", get(list_page).post(create_book))
        .route("/books/add", get(add_page))
        .route("/books/delete", get(delete_page))
        .route("/books/:id/edit", get(edit_page))
        .route("/books/:id/update", post(update_book))
        .route("/books/:id/delete", post(delete_book))
        .with_state(state)
}

/// Error rendered as an HTML page
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let message = match &self.0 {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "The catalog is unavailable right now.".to_string()
            }
            other => other.to_string(),
        };
        (status, Html(views::error_page(status, &message))).into_response()
    }
}

type PageResult<T> = Result<T, PageError>;

/// Submitted add/edit form. Fields missing from the submission stay `None`.
#[derive(Debug, Default, Deserialize)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub borrowed_status: Option<String>,
    pub year: Option<String>,
}

impl BookForm {
    fn into_create(self) -> CreateBook {
        CreateBook {
            title: self.title,
            author: self.author,
            genre: self.genre,
            borrowed_status: self.borrowed_status,
            year: self.year.map(Year::new),
        }
    }

    /// Title and author are always part of an edit; a missing one counts as blank.
    fn into_update(self) -> UpdateBook {
        UpdateBook {
            title: Some(self.title.unwrap_or_default()),
            author: Some(self.author.unwrap_or_default()),
            genre: self.genre,
            borrowed_status: self.borrowed_status,
            year: self.year.map(Year::new),
        }
    }
}

async fn list_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<BookQuery>,
) -> PageResult<(CookieJar, Html<String>)> {
    let search = query.query.as_deref().map(str::trim).unwrap_or_default();
    let books = state.services.catalog.list_books(Some(search)).await?;
    let (jar, notice) = notice::take(jar);
    Ok((jar, Html(views::list_page(&books, search, notice))))
}

async fn add_page(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, notice) = notice::take(jar);
    (jar, Html(views::add_page(notice)))
}

async fn create_book(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> (CookieJar, Redirect) {
    let jar = match state
        .services
        .catalog
        .create_book(form.into_create(), REQUIRED_FIELDS)
        .await
    {
        Ok(_) => jar,
        Err(AppError::Validation { .. }) => notice::push(jar, Notice::MissingFields),
        Err(e) => {
            tracing::warn!("Failed to add book: {}", e);
            notice::push(jar, Notice::SaveFailed)
        }
    };
    (jar, Redirect::to("/books"))
}

async fn edit_page(
    State(state): State<AppState>,
    jar: CookieJar,
    BookId(id): BookId,
) -> PageResult<(CookieJar, Html<String>)> {
    let book = state.services.catalog.get_book(id).await?;
    let (jar, notice) = notice::take(jar);
    Ok((jar, Html(views::edit_page(&book, notice))))
}

async fn update_book(
    State(state): State<AppState>,
    jar: CookieJar,
    BookId(id): BookId,
    Form(form): Form<BookForm>,
) -> PageResult<(CookieJar, Redirect)> {
    match state.services.catalog.update_book(id, form.into_update()).await {
        Ok(_) => Ok((jar, Redirect::to("/books"))),
        Err(AppError::Validation { .. }) => Ok((
            notice::push(jar, Notice::MissingFields),
            Redirect::to(&format!("/books/{}/edit", id)),
        )),
        Err(e @ AppError::NotFound(_)) => Err(e.into()),
        Err(e) => {
            tracing::warn!(book_id = id, "Failed to update book: {}", e);
            Ok((notice::push(jar, Notice::UpdateFailed), Redirect::to("/books")))
        }
    }
}

async fn delete_page(State(state): State<AppState>, jar: CookieJar) -> PageResult<(CookieJar, Html<String>)> {
    let books = state.services.catalog.list_books(None).await?;
    let (jar, notice) = notice::take(jar);
    Ok((jar, Html(views::delete_page(&books, notice))))
}

/// Deleting an unknown id is not an error here
async fn delete_book(
    State(state): State<AppState>,
    jar: CookieJar,
    BookId(id): BookId,
) -> (CookieJar, Redirect) {
    let jar = match state.services.catalog.delete_book(id).await {
        Ok(_) => jar,
        Err(e) => {
            tracing::warn!(book_id = id, "Failed to delete book: {}", e);
            notice::push(jar, Notice::DeleteFailed)
        }
    };
    (jar, Redirect::to("/books"))
}
