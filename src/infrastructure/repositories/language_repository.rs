//! SeaORM implementation of LanguageRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::domain::{DomainError, Language, LanguageRepository};
use crate::models::language::{ActiveModel, Column, Entity as LanguageEntity};

/// SeaORM-based implementation of LanguageRepository
pub struct SeaOrmLanguageRepository {
    db: DatabaseConnection,
}

impl SeaOrmLanguageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LanguageRepository for SeaOrmLanguageRepository {
    async fn find_all(&self) -> Result<Vec<Language>, DomainError> {
        let languages = LanguageEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;

        Ok(languages
            .into_iter()
            .map(|l| Language {
                id: l.id,
                name: l.name,
                created_at: l.created_at,
                updated_at: l.updated_at,
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Language>, DomainError> {
        let language = LanguageEntity::find_by_id(id).one(&self.db).await?;

        Ok(language.map(|l| Language {
            id: l.id,
            name: l.name,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }))
    }

    async fn create(&self, name: String) -> Result<Language, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Language name cannot be empty".to_string(),
            ));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let new_language = ActiveModel {
            name: Set(name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_language.insert(&self.db).await?;

        Ok(Language {
            id: result.id,
            name: result.name,
            created_at: result.created_at,
            updated_at: result.updated_at,
        })
    }

    async fn update(&self, id: i32, name: String) -> Result<Language, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Language name cannot be empty".to_string(),
            ));
        }

        let existing = LanguageEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(name);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active.update(&self.db).await?;

        Ok(Language {
            id: updated.id,
            name: updated.name,
            created_at: updated.created_at,
            updated_at: updated.updated_at,
        })
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = LanguageEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
