//! SeaORM implementation of GenreRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::domain::{DomainError, Genre, GenreRepository};
use crate::models::genre::{ActiveModel, Column, Entity as GenreEntity};

/// SeaORM-based implementation of GenreRepository
pub struct SeaOrmGenreRepository {
    db: DatabaseConnection,
}

impl SeaOrmGenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GenreRepository for SeaOrmGenreRepository {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError> {
        let genres = GenreEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;

        Ok(genres
            .into_iter()
            .map(|g| Genre {
                id: g.id,
                name: g.name,
                created_at: g.created_at,
                updated_at: g.updated_at,
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError> {
        let genre = GenreEntity::find_by_id(id).one(&self.db).await?;

        Ok(genre.map(|g| Genre {
            id: g.id,
            name: g.name,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }))
    }

    async fn create(&self, name: String) -> Result<Genre, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Genre name cannot be empty".to_string(),
            ));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let new_genre = ActiveModel {
            name: Set(name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_genre.insert(&self.db).await?;

        Ok(Genre {
            id: result.id,
            name: result.name,
            created_at: result.created_at,
            updated_at: result.updated_at,
        })
    }

    async fn update(&self, id: i32, name: String) -> Result<Genre, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Genre name cannot be empty".to_string(),
            ));
        }

        let existing = GenreEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(name);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active.update(&self.db).await?;

        Ok(Genre {
            id: updated.id,
            name: updated.name,
            created_at: updated.created_at,
            updated_at: updated.updated_at,
        })
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = GenreEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
