//! Book API handlers using repository pattern

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{BookInput, DomainError};
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "List all books, ordered by title")
    )
)]
pub async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    match state.book_repo.find_all().await {
        Ok(books) => {
            let total = books.len();
            Json(json!({
                "books": books,
                "total": total
            }))
            .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

/// Request DTO for creating or replacing a book
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct BookRequest {
    pub title: String,
    /// Enter a brief description of the book
    pub summary: String,
    /// 13 character ISBN number
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    /// Select genres for this book
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

impl From<BookRequest> for BookInput {
    fn from(payload: BookRequest) -> Self {
        BookInput {
            title: payload.title,
            summary: payload.summary,
            isbn: payload.isbn,
            author_id: payload.author_id,
            language_id: payload.language_id,
            genre_ids: payload.genre_ids,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid book data")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<BookRequest>,
) -> impl IntoResponse {
    match state.book_repo.create(payload.into()).await {
        Ok(book) => (
            StatusCode::CREATED,
            Json(json!({
                "book": book,
                "message": "Book created successfully"
            })),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to create book: {}", e)})),
        )
            .into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(
        ("id" = i32, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.book_repo.find_by_id(id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(json!({"book": book}))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Book not found"})),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

// Get the physical copies of one book
pub async fn get_book_instances(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let today = state.clock.today();

    match state.instance_repo.find_by_book(id, today).await {
        Ok(instances) => {
            let total = instances.len();
            Json(json!({
                "instances": instances,
                "total": total
            }))
            .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(
        ("id" = i32, Path, description = "Book id")
    ),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid book data"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BookRequest>,
) -> impl IntoResponse {
    match state.book_repo.update(id, payload.into()).await {
        Ok(book) => (StatusCode::OK, Json(json!({"book": book}))).into_response(),
        Err(DomainError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Book not found"})),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to update book: {}", e)})),
        )
            .into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(
        ("id" = i32, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book deleted; its copies survive with the link cleared")
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.book_repo.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Book deleted successfully"})),
        )
            .into_response(),
        Err(DomainError::NotFound) => {
            // Idempotent delete - return OK even if not found
            (
                StatusCode::OK,
                Json(json!({"message": "Book deleted successfully"})),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to delete book: {}", e)})),
        )
            .into_response(),
    }
}
