//! SeaORM implementation of BookInstanceRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::{
    BookInstance, BookInstanceRepository, CreateBookInstanceInput, DomainError,
    UpdateBookInstanceInput,
};
use crate::models::LoanStatus;
use crate::models::book::Entity as BookEntity;
use crate::models::book_instance::{ActiveModel, Column, Entity as InstanceEntity, Model};
use crate::models::user::Entity as UserEntity;

/// SeaORM-based implementation of BookInstanceRepository
pub struct SeaOrmBookInstanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookInstanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_book_exists(&self, book_id: i32) -> Result<(), DomainError> {
        if BookEntity::find_by_id(book_id).one(&self.db).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "Unknown book id {}",
                book_id
            )));
        }

        Ok(())
    }

    async fn ensure_borrower_exists(&self, borrower_id: i32) -> Result<(), DomainError> {
        if UserEntity::find_by_id(borrower_id).one(&self.db).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "Unknown borrower id {}",
                borrower_id
            )));
        }

        Ok(())
    }

    async fn book_title(&self, book_id: Option<i32>) -> Result<Option<String>, DomainError> {
        match book_id {
            Some(book_id) => Ok(BookEntity::find_by_id(book_id)
                .one(&self.db)
                .await?
                .map(|b| b.title)),
            None => Ok(None),
        }
    }
}

fn to_row(model: Model, book_title: Option<String>, today: NaiveDate) -> BookInstance {
    let is_overdue = model.is_overdue(today);
    let display = model.display_label(book_title.as_deref());

    BookInstance {
        id: model.id,
        book_id: model.book_id,
        book_title,
        imprint: model.imprint,
        due_back: model.due_back,
        borrower_id: model.borrower_id,
        status: model.status,
        status_label: model.status.label().to_string(),
        is_overdue,
        display,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl BookInstanceRepository for SeaOrmBookInstanceRepository {
    async fn find_all(
        &self,
        status: Option<LoanStatus>,
        today: NaiveDate,
    ) -> Result<Vec<BookInstance>, DomainError> {
        // Due date ascending; SQLite puts undated copies first
        let mut query = InstanceEntity::find()
            .find_also_related(BookEntity)
            .order_by_asc(Column::DueBack);

        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }

        let rows = query.all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|(instance, book)| to_row(instance, book.map(|b| b.title), today))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &str,
        today: NaiveDate,
    ) -> Result<Option<BookInstance>, DomainError> {
        let row = InstanceEntity::find_by_id(id)
            .find_also_related(BookEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(instance, book)| to_row(instance, book.map(|b| b.title), today)))
    }

    async fn find_by_book(
        &self,
        book_id: i32,
        today: NaiveDate,
    ) -> Result<Vec<BookInstance>, DomainError> {
        let rows = InstanceEntity::find()
            .find_also_related(BookEntity)
            .filter(Column::BookId.eq(book_id))
            .order_by_asc(Column::DueBack)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(instance, book)| to_row(instance, book.map(|b| b.title), today))
            .collect())
    }

    async fn create(
        &self,
        input: CreateBookInstanceInput,
        today: NaiveDate,
    ) -> Result<BookInstance, DomainError> {
        if let Some(book_id) = input.book_id {
            self.ensure_book_exists(book_id).await?;
        }
        if let Some(borrower_id) = input.borrower_id {
            self.ensure_borrower_exists(borrower_id).await?;
        }

        let now = chrono::Utc::now().to_rfc3339();
        let new_instance = ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            book_id: Set(input.book_id),
            imprint: Set(input.imprint),
            due_back: Set(input.due_back),
            borrower_id: Set(input.borrower_id),
            status: Set(input.status.unwrap_or_default()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let instance = new_instance.insert(&self.db).await?;
        let book_title = self.book_title(instance.book_id).await?;

        Ok(to_row(instance, book_title, today))
    }

    async fn update(
        &self,
        id: &str,
        input: UpdateBookInstanceInput,
        today: NaiveDate,
    ) -> Result<BookInstance, DomainError> {
        let existing = InstanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(book_id) = input.book_id {
            if let Some(book_id) = book_id {
                self.ensure_book_exists(book_id).await?;
            }
            active.book_id = Set(book_id);
        }

        if let Some(imprint) = input.imprint {
            active.imprint = Set(imprint);
        }

        if let Some(due_back) = input.due_back {
            active.due_back = Set(due_back);
        }

        if let Some(borrower_id) = input.borrower_id {
            if let Some(borrower_id) = borrower_id {
                self.ensure_borrower_exists(borrower_id).await?;
            }
            active.borrower_id = Set(borrower_id);
        }

        if let Some(status) = input.status {
            active.status = Set(status);
        }

        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let instance = active.update(&self.db).await?;
        let book_title = self.book_title(instance.book_id).await?;

        Ok(to_row(instance, book_title, today))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = InstanceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
