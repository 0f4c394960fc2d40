//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::domain::{Author, AuthorInput, AuthorRepository, DomainError};
use crate::models::author::{ActiveModel, Column, Entity as AuthorEntity, Model};

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: Model) -> Author {
    let display = model.to_string();
    let detail_url = model.detail_url();

    Author {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        date_of_birth: model.date_of_birth,
        date_of_death: model.date_of_death,
        display,
        detail_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn validate(input: &AuthorInput) -> Result<(), DomainError> {
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(DomainError::Validation(
            "Author name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Author>, DomainError> {
        let authors = AuthorEntity::find()
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .all(&self.db)
            .await?;

        Ok(authors.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;

        Ok(author.map(to_domain))
    }

    async fn create(&self, input: AuthorInput) -> Result<Author, DomainError> {
        validate(&input)?;

        let now = chrono::Utc::now().to_rfc3339();
        let new_author = ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            date_of_birth: Set(input.date_of_birth),
            date_of_death: Set(input.date_of_death),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = new_author.insert(&self.db).await?;

        Ok(to_domain(result))
    }

    async fn update(&self, id: i32, input: AuthorInput) -> Result<Author, DomainError> {
        validate(&input)?;

        let existing = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.date_of_birth = Set(input.date_of_birth);
        active.date_of_death = Set(input.date_of_death);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active.update(&self.db).await?;

        Ok(to_domain(updated))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = AuthorEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
