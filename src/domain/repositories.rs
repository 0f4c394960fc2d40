//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::DomainError;
use crate::models::LoanStatus;

/// Genre data for API responses
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Repository trait for Genre entity
#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Find all genres, alphabetically
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError>;

    /// Find a genre by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError>;

    /// Create a new genre
    async fn create(&self, name: String) -> Result<Genre, DomainError>;

    /// Rename a genre
    async fn update(&self, id: i32, name: String) -> Result<Genre, DomainError>;

    /// Delete a genre by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Language data for API responses
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Repository trait for Language entity
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    /// Find all languages, alphabetically
    async fn find_all(&self) -> Result<Vec<Language>, DomainError>;

    /// Find a language by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Language>, DomainError>;

    /// Create a new language
    async fn create(&self, name: String) -> Result<Language, DomainError>;

    /// Rename a language
    async fn update(&self, id: i32, name: String) -> Result<Language, DomainError>;

    /// Delete a language by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Author data for API responses
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    /// Listing label, surname first
    pub display: String,
    /// Canonical path of this author's record
    pub detail_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating or fully replacing an author
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthorInput {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors ordered by (last_name, first_name)
    async fn find_all(&self) -> Result<Vec<Author>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError>;

    /// Create a new author
    async fn create(&self, input: AuthorInput) -> Result<Author, DomainError>;

    /// Replace an author's fields
    async fn update(&self, id: i32, input: AuthorInput) -> Result<Author, DomainError>;

    /// Delete an author by ID; their books survive with the link cleared
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Book data for API responses
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    /// Author listing label, if the author record still exists
    pub author: Option<String>,
    pub summary: String,
    pub isbn: String,
    pub language_id: Option<i32>,
    pub genre_ids: Vec<i32>,
    /// Canonical path of this book's record
    pub detail_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating or fully replacing a book
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BookInput {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books ordered by title
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Find a book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Find all books by one author
    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Book>, DomainError>;

    /// Create a new book and link its genres
    async fn create(&self, input: BookInput) -> Result<Book, DomainError>;

    /// Replace a book's fields and its genre set
    async fn update(&self, id: i32, input: BookInput) -> Result<Book, DomainError>;

    /// Delete a book by ID; its copies survive with the link cleared
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Book instance (physical copy) data for API responses
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct BookInstance {
    pub id: String,
    pub book_id: Option<i32>,
    /// Title of the linked book, if it still exists
    pub book_title: Option<String>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: LoanStatus,
    pub status_label: String,
    /// Whether the copy is past its due date, relative to the caller's date
    pub is_overdue: bool,
    /// Listing label: "<id> (<book title>)"
    pub display: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a book instance
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateBookInstanceInput {
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    /// Defaults to Maintenance when omitted
    pub status: Option<LoanStatus>,
}

/// Input for partially updating a book instance.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears a nullable
/// field.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UpdateBookInstanceInput {
    pub book_id: Option<Option<i32>>,
    pub imprint: Option<String>,
    pub due_back: Option<Option<NaiveDate>>,
    pub borrower_id: Option<Option<i32>>,
    pub status: Option<LoanStatus>,
}

/// Repository trait for BookInstance entity.
///
/// Methods that build response rows take `today` from the caller because
/// the overdue flag is a function of the calendar date.
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    /// Find all instances ordered by due date (undated copies first),
    /// optionally narrowed to one status
    async fn find_all(
        &self,
        status: Option<LoanStatus>,
        today: NaiveDate,
    ) -> Result<Vec<BookInstance>, DomainError>;

    /// Find an instance by its uuid
    async fn find_by_id(&self, id: &str, today: NaiveDate)
        -> Result<Option<BookInstance>, DomainError>;

    /// Find all copies of one book
    async fn find_by_book(
        &self,
        book_id: i32,
        today: NaiveDate,
    ) -> Result<Vec<BookInstance>, DomainError>;

    /// Create a new instance with a generated uuid
    async fn create(
        &self,
        input: CreateBookInstanceInput,
        today: NaiveDate,
    ) -> Result<BookInstance, DomainError>;

    /// Partially update an instance
    async fn update(
        &self,
        id: &str,
        input: UpdateBookInstanceInput,
        today: NaiveDate,
    ) -> Result<BookInstance, DomainError>;

    /// Delete an instance by its uuid
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
