//! Catalog-wide counts, the numbers a landing page shows

use axum::{Json, extract::State};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{Value, json};

use crate::infrastructure::AppState;
use crate::models::{LoanStatus, author, book, book_instance, genre, language};

pub async fn get_stats(State(state): State<AppState>) -> Json<Value> {
    let db = state.db();

    let books = book::Entity::find().count(db).await.unwrap_or(0);
    let authors = author::Entity::find().count(db).await.unwrap_or(0);
    let genres = genre::Entity::find().count(db).await.unwrap_or(0);
    let languages = language::Entity::find().count(db).await.unwrap_or(0);
    let instances = book_instance::Entity::find().count(db).await.unwrap_or(0);
    let instances_available = book_instance::Entity::find()
        .filter(book_instance::Column::Status.eq(LoanStatus::Available))
        .count(db)
        .await
        .unwrap_or(0);

    Json(json!({
        "books": books,
        "authors": authors,
        "genres": genres,
        "languages": languages,
        "book_instances": instances,
        "instances_available": instances_available
    }))
}
