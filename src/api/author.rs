//! Author API handlers using repository pattern

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{AuthorInput, DomainError};
use crate::infrastructure::AppState;

// List all authors, surname first
pub async fn list_authors(State(state): State<AppState>) -> impl IntoResponse {
    match state.author_repo.find_all().await {
        Ok(authors) => {
            let total = authors.len();
            Json(json!({
                "authors": authors,
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

/// Request DTO for creating or replacing an author
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AuthorRequest {
    pub first_name: String,
    pub last_name: String,
    /// ISO date, e.g. 1920-10-08
    pub date_of_birth: Option<NaiveDate>,
    /// ISO date; omit for living authors
    pub date_of_death: Option<NaiveDate>,
}

impl From<AuthorRequest> for AuthorInput {
    fn from(payload: AuthorRequest) -> Self {
        AuthorInput {
            first_name: payload.first_name,
            last_name: payload.last_name,
            date_of_birth: payload.date_of_birth,
            date_of_death: payload.date_of_death,
        }
    }
}

// Create a new author
pub async fn create_author(
    State(state): State<AppState>,
    Json(payload): Json<AuthorRequest>,
) -> impl IntoResponse {
    match state.author_repo.create(payload.into()).await {
        Ok(author) => (
            StatusCode::CREATED,
            Json(json!({
                "author": author,
                "message": "Author created successfully"
            })),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to create author: {}", e)})),
        )
            .into_response(),
    }
}

// Get a single author by ID
pub async fn get_author(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.author_repo.find_by_id(id).await {
        Ok(Some(author)) => (StatusCode::OK, Json(json!({"author": author}))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Author not found"})),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

// Get all books by one author
pub async fn get_author_books(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.book_repo.find_by_author(id).await {
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

// Replace an author's fields
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AuthorRequest>,
) -> impl IntoResponse {
    match state.author_repo.update(id, payload.into()).await {
        Ok(author) => (StatusCode::OK, Json(json!({"author": author}))).into_response(),
        Err(DomainError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Author not found"})),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to update author: {}", e)})),
        )
            .into_response(),
    }
}

// Delete an author; their books stay, with the author link cleared
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.author_repo.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Author deleted successfully"})),
        )
            .into_response(),
        Err(DomainError::NotFound) => {
            // Idempotent delete - return OK even if not found
            (
                StatusCode::OK,
                Json(json!({"message": "Author deleted successfully"})),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to delete author: {}", e)})),
        )
            .into_response(),
    }
}
