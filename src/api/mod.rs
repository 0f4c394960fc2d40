//! HTTP API: one handler module per resource

pub mod author;
pub mod books;
pub mod genre;
pub mod health;
pub mod instance;
pub mod language;
pub mod paths;
pub mod stats;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Catalog counts
        .route("/stats", get(stats::get_stats))
        // Genres
        .route("/genres", get(genre::list_genres))
        .route("/genres", post(genre::create_genre))
        .route(
            "/genres/:id",
            get(genre::get_genre)
                .put(genre::update_genre)
                .delete(genre::delete_genre),
        )
        // Languages
        .route("/languages", get(language::list_languages))
        .route("/languages", post(language::create_language))
        .route(
            "/languages/:id",
            get(language::get_language)
                .put(language::update_language)
                .delete(language::delete_language),
        )
        // Authors
        .route("/authors", get(author::list_authors))
        .route("/authors", post(author::create_author))
        .route(
            "/authors/:id",
            get(author::get_author)
                .put(author::update_author)
                .delete(author::delete_author),
        )
        .route("/authors/:id/books", get(author::get_author_books))
        // Books
        .route("/books", get(books::list_books))
        .route("/books", post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/:id/instances", get(books::get_book_instances))
        // Book instances (physical copies)
        .route("/instances", get(instance::list_instances))
        .route("/instances", post(instance::create_instance))
        .route(
            "/instances/:id",
            get(instance::get_instance)
                .put(instance::update_instance)
                .delete(instance::delete_instance),
        )
        .with_state(state)
}
