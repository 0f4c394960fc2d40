//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{Book, BookInput, BookRepository, DomainError};
use crate::models::author::Entity as AuthorEntity;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Model};
use crate::models::book_genres::{self, ActiveModel as BookGenreActiveModel};
use crate::models::genre::{self, Entity as GenreEntity};
use crate::models::language::Entity as LanguageEntity;

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn to_domain(&self, model: Model) -> Result<Book, DomainError> {
        let author = match model.author_id {
            Some(author_id) => AuthorEntity::find_by_id(author_id)
                .one(&self.db)
                .await?
                .map(|a| a.to_string()),
            None => None,
        };

        let genre_ids = model
            .find_related(GenreEntity)
            .order_by_asc(genre::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();

        let detail_url = model.detail_url();

        Ok(Book {
            id: model.id,
            title: model.title,
            author_id: model.author_id,
            author,
            summary: model.summary,
            isbn: model.isbn,
            language_id: model.language_id,
            genre_ids,
            detail_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    /// Reject inputs pointing at records that do not exist, so callers get a
    /// validation error instead of a foreign-key failure from the driver.
    async fn check_references(&self, input: &BookInput) -> Result<(), DomainError> {
        if let Some(author_id) = input.author_id {
            if AuthorEntity::find_by_id(author_id).one(&self.db).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "Unknown author id {}",
                    author_id
                )));
            }
        }

        if let Some(language_id) = input.language_id {
            if LanguageEntity::find_by_id(language_id).one(&self.db).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "Unknown language id {}",
                    language_id
                )));
            }
        }

        for &genre_id in &input.genre_ids {
            if GenreEntity::find_by_id(genre_id).one(&self.db).await?.is_none() {
                return Err(DomainError::Validation(format!(
                    "Unknown genre id {}",
                    genre_id
                )));
            }
        }

        Ok(())
    }
}

fn validate(input: &BookInput) -> Result<(), DomainError> {
    if input.title.trim().is_empty() {
        return Err(DomainError::Validation(
            "Book title cannot be empty".to_string(),
        ));
    }

    if input.summary.chars().count() > 1000 {
        return Err(DomainError::Validation(
            "Summary cannot exceed 1000 characters".to_string(),
        ));
    }

    if input.isbn.chars().count() > 13 {
        return Err(DomainError::Validation(
            "ISBN cannot exceed 13 characters".to_string(),
        ));
    }

    Ok(())
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        // One lookup per book for author and genres; fine at catalog scale
        let mut result = Vec::new();
        for book in books {
            result.push(self.to_domain(book).await?);
        }

        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        match BookEntity::find_by_id(id).one(&self.db).await? {
            Some(book) => Ok(Some(self.to_domain(book).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .filter(Column::AuthorId.eq(author_id))
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        let mut result = Vec::new();
        for book in books {
            result.push(self.to_domain(book).await?);
        }

        Ok(result)
    }

    async fn create(&self, input: BookInput) -> Result<Book, DomainError> {
        validate(&input)?;
        self.check_references(&input).await?;

        let now = chrono::Utc::now().to_rfc3339();
        let new_book = ActiveModel {
            title: Set(input.title),
            author_id: Set(input.author_id),
            summary: Set(input.summary),
            isbn: Set(input.isbn),
            language_id: Set(input.language_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let book = new_book.insert(&self.db).await?;

        for genre_id in input.genre_ids {
            let link = BookGenreActiveModel {
                book_id: Set(book.id),
                genre_id: Set(genre_id),
            };
            link.insert(&self.db).await?;
        }

        self.to_domain(book).await
    }

    async fn update(&self, id: i32, input: BookInput) -> Result<Book, DomainError> {
        validate(&input)?;
        self.check_references(&input).await?;

        let existing = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.title = Set(input.title);
        active.author_id = Set(input.author_id);
        active.summary = Set(input.summary);
        active.isbn = Set(input.isbn);
        active.language_id = Set(input.language_id);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let book = active.update(&self.db).await?;

        // Replace the genre set in one transaction so a failed insert
        // cannot leave the book with half its links gone
        let txn = self.db.begin().await?;

        book_genres::Entity::delete_many()
            .filter(book_genres::Column::BookId.eq(id))
            .exec(&txn)
            .await?;

        for genre_id in input.genre_ids {
            let link = BookGenreActiveModel {
                book_id: Set(book.id),
                genre_id: Set(genre_id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;

        self.to_domain(book).await
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
