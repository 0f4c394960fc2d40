//! Language API handlers using repository pattern

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

// List all languages
pub async fn list_languages(State(state): State<AppState>) -> impl IntoResponse {
    match state.language_repo.find_all().await {
        Ok(languages) => {
            let total = languages.len();
            Json(json!({
                "languages": languages,
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

/// Request DTO for creating or renaming a language
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LanguageRequest {
    /// Enter the book's natural language (e.g. English, French, Japanese etc.)
    pub name: String,
}

// Create a new language
pub async fn create_language(
    State(state): State<AppState>,
    Json(payload): Json<LanguageRequest>,
) -> impl IntoResponse {
    match state.language_repo.create(payload.name).await {
        Ok(language) => (
            StatusCode::CREATED,
            Json(json!({
                "language": language,
                "message": "Language created successfully"
            })),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to create language: {}", e)})),
        )
            .into_response(),
    }
}

// Get a single language by ID
pub async fn get_language(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.language_repo.find_by_id(id).await {
        Ok(Some(language)) => (StatusCode::OK, Json(json!({"language": language}))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Language not found"})),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

// Rename a language
pub async fn update_language(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<LanguageRequest>,
) -> impl IntoResponse {
    match state.language_repo.update(id, payload.name).await {
        Ok(language) => (StatusCode::OK, Json(json!({"language": language}))).into_response(),
        Err(DomainError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Language not found"})),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to update language: {}", e)})),
        )
            .into_response(),
    }
}

// Delete a language
pub async fn delete_language(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.language_repo.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Language deleted successfully"})),
        )
            .into_response(),
        Err(DomainError::NotFound) => {
            // Idempotent delete - return OK even if not found
            (
                StatusCode::OK,
                Json(json!({"message": "Language deleted successfully"})),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to delete language: {}", e)})),
        )
            .into_response(),
    }
}
