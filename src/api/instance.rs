//! Book instance (physical copy) API handlers using repository pattern
//!
//! Every response row carries an `is_overdue` flag computed against the
//! date supplied by the state's clock, never the wall clock directly.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::domain::{CreateBookInstanceInput, DomainError, UpdateBookInstanceInput};
use crate::infrastructure::AppState;
use crate::models::LoanStatus;

#[derive(Debug, Deserialize)]
pub struct ListInstancesQuery {
    pub status: Option<LoanStatus>,
}

#[utoipa::path(
    get,
    path = "/api/instances",
    params(
        ("status" = Option<LoanStatus>, Query, description = "Only copies in this loan state")
    ),
    responses(
        (status = 200, description = "List all copies ordered by due date, undated copies first")
    )
)]
pub async fn list_instances(
    State(state): State<AppState>,
    Query(query): Query<ListInstancesQuery>,
) -> impl IntoResponse {
    let today = state.clock.today();

    match state.instance_repo.find_all(query.status, today).await {
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

/// Request DTO for creating a copy
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateInstanceRequest {
    /// Book this copy is an instance of
    pub book_id: Option<i32>,
    /// Publisher and edition of this copy
    pub imprint: String,
    /// Date the copy is expected back, when out on loan
    pub due_back: Option<NaiveDate>,
    /// Member currently holding the copy
    pub borrower_id: Option<i32>,
    /// Book availability; defaults to maintenance for fresh stock
    pub status: Option<LoanStatus>,
}

impl From<CreateInstanceRequest> for CreateBookInstanceInput {
    fn from(payload: CreateInstanceRequest) -> Self {
        CreateBookInstanceInput {
            book_id: payload.book_id,
            imprint: payload.imprint,
            due_back: payload.due_back,
            borrower_id: payload.borrower_id,
            status: payload.status,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/instances",
    request_body = CreateInstanceRequest,
    responses(
        (status = 201, description = "Copy created with a generated uuid"),
        (status = 400, description = "Invalid copy data")
    )
)]
pub async fn create_instance(
    State(state): State<AppState>,
    Json(payload): Json<CreateInstanceRequest>,
) -> impl IntoResponse {
    let today = state.clock.today();

    match state.instance_repo.create(payload.into(), today).await {
        Ok(instance) => (
            StatusCode::CREATED,
            Json(json!({
                "instance": instance,
                "message": "Book instance created successfully"
            })),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to create book instance: {}", e)})),
        )
            .into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/instances/{id}",
    params(
        ("id" = String, Path, description = "Copy uuid")
    ),
    responses(
        (status = 200, description = "Copy found"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let today = state.clock.today();

    match state.instance_repo.find_by_id(&id, today).await {
        Ok(Some(instance)) => (StatusCode::OK, Json(json!({"instance": instance}))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Book instance not found"})),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

// Serde folds an explicit `null` into a missing field; wrapping the parsed
// value keeps the two apart so an update can clear a nullable column.
fn some_if_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// DTO for partial copy updates.
///
/// Omit a field to keep it; send `null` to clear a nullable field.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateInstanceRequest {
    #[serde(default, deserialize_with = "some_if_present")]
    pub book_id: Option<Option<i32>>,
    pub imprint: Option<String>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub due_back: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub borrower_id: Option<Option<i32>>,
    /// Book availability
    pub status: Option<LoanStatus>,
}

impl From<UpdateInstanceRequest> for UpdateBookInstanceInput {
    fn from(payload: UpdateInstanceRequest) -> Self {
        UpdateBookInstanceInput {
            book_id: payload.book_id,
            imprint: payload.imprint,
            due_back: payload.due_back,
            borrower_id: payload.borrower_id,
            status: payload.status,
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/instances/{id}",
    params(
        ("id" = String, Path, description = "Copy uuid")
    ),
    request_body = UpdateInstanceRequest,
    responses(
        (status = 200, description = "Copy updated"),
        (status = 400, description = "Invalid copy data"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateInstanceRequest>,
) -> impl IntoResponse {
    let today = state.clock.today();

    match state.instance_repo.update(&id, payload.into(), today).await {
        Ok(instance) => (StatusCode::OK, Json(json!({"instance": instance}))).into_response(),
        Err(DomainError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Book instance not found"})),
        )
            .into_response(),
        Err(DomainError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to update book instance: {}", e)})),
        )
            .into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/instances/{id}",
    params(
        ("id" = String, Path, description = "Copy uuid")
    ),
    responses(
        (status = 200, description = "Copy deleted")
    )
)]
pub async fn delete_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.instance_repo.delete(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Book instance deleted successfully"})),
        )
            .into_response(),
        Err(DomainError::NotFound) => {
            // Idempotent delete - return OK even if not found
            (
                StatusCode::OK,
                Json(json!({"message": "Book instance deleted successfully"})),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("Failed to delete book instance: {}", e)})),
        )
            .into_response(),
    }
}
