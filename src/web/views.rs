//! Server-rendered HTML pages

use axum::http::StatusCode;

use super::notice::Notice;
use crate::models::book::Book;

/// Escape text for element content and double-quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn opt(value: Option<&str>) -> String {
    value.map(escape).unwrap_or_default()
}

fn layout(title: &str, notice: Option<Notice>, body: &str) -> String {
    let notice = notice
        .map(|n| format!(r#"<p class="notice error">{}</p>"#, escape(n.message())))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Bookshelf</title>
</head>
<body>
<nav><a href="/books">All books</a> | <a href="/books/add">Add a book</a> | <a href="/books/delete">Delete books</a></nav>
<h1>{title}</h1>
{notice}
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

fn book_fields(book: Option<&Book>) -> String {
    let title = book.map(|b| escape(&b.title)).unwrap_or_default();
    let author = book.map(|b| escape(&b.author)).unwrap_or_default();
    let genre = opt(book.and_then(|b| b.genre.as_deref()));
    let status = book.map(|b| escape(&b.borrowed_status)).unwrap_or_default();
    let year = opt(book.and_then(|b| b.year.as_ref()).map(|y| y.as_str()));

    format!(
        r#"<label>Title <input type="text" name="title" value="{title}" required></label>
<label>Author <input type="text" name="author" value="{author}" required></label>
<label>Genre <input type="text" name="genre" value="{genre}"></label>
<label>Status <input type="text" name="borrowed_status" value="{status}" placeholder="in-store"></label>
<label>Year <input type="text" name="year" value="{year}"></label>"#
    )
}

/// Catalog table with search box
pub fn list_page(books: &[Book], query: &str, notice: Option<Notice>) -> String {
    let mut body = format!(
        r#"<form method="get" action="/books">
<input type="search" name="query" value="{}" placeholder="Title or author">
<button type="submit">Search</button>
</form>
"#,
        escape(query)
    );

    if books.is_empty() {
        body.push_str("<p>No books found.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>ID</th><th>Title</th><th>Author</th><th>Genre</th><th>Status</th><th>Year</th><th></th></tr>\n",
        );
        for book in books {
            body.push_str(&format!(
                "<tr><td>{id}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/books/{id}/edit\">Edit</a></td></tr>\n",
                escape(&book.title),
                escape(&book.author),
                opt(book.genre.as_deref()),
                escape(&book.borrowed_status),
                opt(book.year.as_ref().map(|y| y.as_str())),
                id = book.id,
            ));
        }
        body.push_str("</table>\n");
    }

    layout("Library Books", notice, &body)
}

pub fn add_page(notice: Option<Notice>) -> String {
    let body = format!(
        r#"<form method="post" action="/books">
{}
<button type="submit">Add book</button>
</form>"#,
        book_fields(None)
    );
    layout("Add a Book", notice, &body)
}

pub fn edit_page(book: &Book, notice: Option<Notice>) -> String {
    let body = format!(
        r#"<form method="post" action="/books/{}/update">
{}
<button type="submit">Save changes</button>
</form>"#,
        book.id,
        book_fields(Some(book))
    );
    layout(&format!("Edit \"{}\"", book.title), notice, &body)
}

/// Every book with its own delete button
pub fn delete_page(books: &[Book], notice: Option<Notice>) -> String {
    let mut body = String::new();
    if books.is_empty() {
        body.push_str("<p>No books to delete.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for book in books {
            body.push_str(&format!(
                "<li>{} by {} <form method=\"post\" action=\"/books/{}/delete\" style=\"display:inline\"><button type=\"submit\">Delete</button></form></li>\n",
                escape(&book.title),
                escape(&book.author),
                book.id,
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Delete Books", notice, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(title, None, &format!("<p>{}</p>", escape(message)))
}
