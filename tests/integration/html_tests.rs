//! HTML front end tests

use crate::common::{location, new_book, set_cookies, spawn_app};

#[tokio::test]
async fn test_root_redirects_to_list() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/books"));
}

#[tokio::test]
async fn test_list_page_reflects_search() {
    let app = spawn_app().await;
    app.repository.books.insert(&new_book("Dune", "Frank Herbert")).await.unwrap();
    app.repository.books.insert(&new_book("Emma", "Jane Austen")).await.unwrap();

    let response = app.client.get(app.url("/books")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("Dune"));
    assert!(html.contains("Emma"));

    let response = app
        .client
        .get(app.url("/books"))
        .query(&[("query", " austen ")])
        .send()
        .await
        .unwrap();
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"value="austen""#));
    assert!(html.contains("Emma"));
    assert!(!html.contains("Dune"));
}

#[tokio::test]
async fn test_add_book_via_form() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/books/add")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains(r#"action="/books""#));

    let response = app
        .client
        .post(app.url("/books"))
        .form(&[
            ("title", " Dune "),
            ("author", "Frank Herbert"),
            ("genre", "Sci-Fi"),
            ("borrowed_status", "in-store"),
            ("year", "1965"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/books"));
    assert!(set_cookies(&response).is_empty());

    let books = app.repository.books.list_all().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].year.as_ref().map(|y| y.as_str()), Some("1965"));
}

#[tokio::test]
async fn test_add_book_missing_fields_sets_notice() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/books"))
        .form(&[("title", "   "), ("author", "Someone"), ("borrowed_status", "in-store")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/books"));
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("notice=missing_fields")));
    assert!(app.repository.books.list_all().await.unwrap().is_empty());

    // The next page shows the notice once and clears it
    let response = app
        .client
        .get(app.url("/books"))
        .header("cookie", "notice=missing_fields")
        .send()
        .await
        .unwrap();
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("notice=;")));
    let html = response.text().await.unwrap();
    assert!(html.contains("Both Title and Author are required!"));
}

#[tokio::test]
async fn test_add_book_storage_failure_redirects() {
    let app = spawn_app().await;

    // borrowed_status is NOT NULL in storage
    let response = app
        .client
        .post(app.url("/books"))
        .form(&[("title", "Dune"), ("author", "Frank Herbert")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/books"));
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("notice=save_failed")));
    assert!(app.repository.books.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_and_update_book() {
    let app = spawn_app().await;
    let book = app.repository.books.insert(&new_book("Emma", "Jane Austen")).await.unwrap();

    let response = app
        .client
        .get(app.url(&format!("/books/{}/edit", book.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"value="Emma""#));
    assert!(html.contains(&format!(r#"action="/books/{}/update""#, book.id)));

    // genre and year are not submitted and keep their values
    let response = app
        .client
        .post(app.url(&format!("/books/{}/update", book.id)))
        .form(&[
            ("title", "Emma"),
            ("author", "Jane Austen"),
            ("borrowed_status", "borrowed"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/books"));

    let stored = app.repository.books.find(book.id).await.unwrap();
    assert_eq!(stored.borrowed_status, "borrowed");
    assert_eq!(stored.genre, book.genre);
    assert_eq!(stored.year, book.year);
}

#[tokio::test]
async fn test_update_with_blank_author_returns_to_form() {
    let app = spawn_app().await;
    let book = app.repository.books.insert(&new_book("Emma", "Jane Austen")).await.unwrap();

    let response = app
        .client
        .post(app.url(&format!("/books/{}/update", book.id)))
        .form(&[("title", "Persuasion"), ("author", " ")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(
        location(&response),
        Some(format!("/books/{}/edit", book.id))
    );
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("notice=missing_fields")));

    assert_eq!(app.repository.books.find(book.id).await.unwrap(), book);
}

#[tokio::test]
async fn test_edit_missing_book_is_not_found() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/books/77/edit")).send().await.unwrap();
    assert_eq!(response.status(), 404);
    assert!(response.text().await.unwrap().contains("Book 77 not found"));

    let response = app
        .client
        .post(app.url("/books/77/update"))
        .form(&[("title", "Ghost"), ("author", "Nobody")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = app.client.get(app.url("/books/abc/edit")).send().await.unwrap();
    assert_eq!(response.status(), 404);
    let response = app.client.post(app.url("/books/abc/delete")).send().await.unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_delete_books() {
    let app = spawn_app().await;
    let book = app.repository.books.insert(&new_book("Dune", "Frank Herbert")).await.unwrap();

    let response = app.client.get(app.url("/books/delete")).send().await.unwrap();
    let html = response.text().await.unwrap();
    assert!(html.contains(&format!(r#"action="/books/{}/delete""#, book.id)));

    let response = app
        .client
        .post(app.url(&format!("/books/{}/delete", book.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/books"));
    assert!(app.repository.books.list_all().await.unwrap().is_empty());

    // Unknown ids are silently ignored
    let response = app
        .client
        .post(app.url(&format!("/books/{}/delete", book.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response).as_deref(), Some("/books"));
    assert!(set_cookies(&response).is_empty());
}
