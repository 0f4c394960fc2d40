//! Genre API handlers using repository pattern

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

// List all genres
pub async fn list_genres(State(state): State<AppState>) -> impl IntoResponse {
    match state.genre_repo.find_all().await {
        Ok(genres) => {
            let total = genres.len();
            Json(json!({
                "genres": genres,
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

/// Request DTO for creating or renaming a genre
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GenreRequest {
    /// Enter a book genre (e.g. Science Fiction)
    pub name: String,
}

// Create a new genre
pub async fn create_genre(
    State(state): State<AppState>,
    Json(payload): Json<GenreRequest>,
) -> impl IntoResponse {
    match state.genre_repo.create(payload.name).await {
        Ok(genre) => (
            StatusCode::CREATED,
            Json(json!({
                "genre": genre,
                "message": "Genre created successfully"
            })),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to create genre: {}", e)})),
        )
            .into_response(),
    }
}

// Get a single genre by ID
pub async fn get_genre(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.genre_repo.find_by_id(id).await {
        Ok(Some(genre)) => (StatusCode::OK, Json(json!({"genre": genre}))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Genre not found"})),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

// Rename a genre
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<GenreRequest>,
) -> impl IntoResponse {
    match state.genre_repo.update(id, payload.name).await {
        Ok(genre) => (StatusCode::OK, Json(json!({"genre": genre}))).into_response(),
        Err(DomainError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Genre not found"})),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to update genre: {}", e)})),
        )
            .into_response(),
    }
}

// Delete a genre
pub async fn delete_genre(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    match state.genre_repo.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Genre deleted successfully"})),
        )
            .into_response(),
        Err(DomainError::NotFound) => {
            // Idempotent delete - return OK even if not found
            (
                StatusCode::OK,
                Json(json!({"message": "Genre deleted successfully"})),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to delete genre: {}", e)})),
        )
            .into_response(),
    }
}
