//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    AuthorRepository, BookInstanceRepository, BookRepository, Clock, GenreRepository,
    LanguageRepository, SystemClock,
};
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookInstanceRepository, SeaOrmBookRepository,
    SeaOrmGenreRepository, SeaOrmLanguageRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection, for the handful of handlers that query directly
    db: DatabaseConnection,
    /// Genre repository
    pub genre_repo: Arc<dyn GenreRepository>,
    /// Language repository
    pub language_repo: Arc<dyn LanguageRepository>,
    /// Author repository
    pub author_repo: Arc<dyn AuthorRepository>,
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
    /// Book instance repository
    pub instance_repo: Arc<dyn BookInstanceRepository>,
    /// Calendar used for overdue checks
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new AppState with all repositories and the system calendar
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_clock(db, Arc::new(SystemClock))
    }

    /// Create an AppState with a caller-supplied calendar.
    ///
    /// Tests pass [`crate::domain::FixedClock`] here to make overdue
    /// flags deterministic.
    pub fn with_clock(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        let genre_repo = Arc::new(SeaOrmGenreRepository::new(db.clone()));
        let language_repo = Arc::new(SeaOrmLanguageRepository::new(db.clone()));
        let author_repo = Arc::new(SeaOrmAuthorRepository::new(db.clone()));
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let instance_repo = Arc::new(SeaOrmBookInstanceRepository::new(db.clone()));

        Self {
            db,
            genre_repo,
            language_repo,
            author_repo,
            book_repo,
            instance_repo,
            clock,
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
