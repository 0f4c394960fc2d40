//! Database initialization and schema migrations
//!
//! Migrations are plain idempotent SQL so a fresh database and an existing
//! one go through the same path on startup.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// Connect to the database and bring the schema up to date
pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    tracing::debug!("Connecting to database at {}", database_url);
    let db = Database::connect(database_url).await?;

    run_migrations(&db).await?;

    tracing::info!("Database initialized");
    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    db.execute(Statement::from_string(
        backend,
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        backend,
        r#"
        CREATE TABLE IF NOT EXISTS languages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        backend,
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            date_of_birth TEXT,
            date_of_death TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_authors_name ON authors(last_name, first_name);
        "#
        .to_owned(),
    ))
    .await?;

    // author_id and language_id are nullable: deleting an author or a
    // language clears the link but keeps the book
    db.execute(Statement::from_string(
        backend,
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author_id INTEGER,
            summary TEXT NOT NULL,
            isbn TEXT NOT NULL,
            language_id INTEGER,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (author_id) REFERENCES authors(id) ON DELETE SET NULL,
            FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE SET NULL
        );
        CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id);
        CREATE INDEX IF NOT EXISTS idx_books_language_id ON books(language_id);
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        backend,
        r#"
        CREATE TABLE IF NOT EXISTS book_genres (
            book_id INTEGER NOT NULL,
            genre_id INTEGER NOT NULL,
            PRIMARY KEY (book_id, genre_id),
            FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE CASCADE,
            FOREIGN KEY (genre_id) REFERENCES genres(id) ON DELETE CASCADE
        );
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        backend,
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#
        .to_owned(),
    ))
    .await?;

    // Copies keep their uuid as a canonical-form TEXT primary key; the book
    // and borrower links are nullable for the same survive-deletion reason
    db.execute(Statement::from_string(
        backend,
        r#"
        CREATE TABLE IF NOT EXISTS book_instances (
            id TEXT PRIMARY KEY NOT NULL,
            book_id INTEGER,
            imprint TEXT NOT NULL,
            due_back TEXT,
            borrower_id INTEGER,
            status TEXT NOT NULL DEFAULT 'm',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE SET NULL,
            FOREIGN KEY (borrower_id) REFERENCES users(id) ON DELETE SET NULL
        );
        CREATE INDEX IF NOT EXISTS idx_book_instances_book_id ON book_instances(book_id);
        CREATE INDEX IF NOT EXISTS idx_book_instances_status ON book_instances(status);
        CREATE INDEX IF NOT EXISTS idx_book_instances_due_back ON book_instances(due_back);
        "#
        .to_owned(),
    ))
    .await?;

    Ok(())
}
