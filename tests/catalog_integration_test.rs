use bibliotek::db;
use bibliotek::domain::{
    AuthorRepository, BookInput, BookInstanceRepository, BookRepository, DomainError,
};
use bibliotek::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookInstanceRepository, SeaOrmBookRepository,
};
use bibliotek::models::{LoanStatus, author, book, book_genres, book_instance, genre, language, user};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// Helper to create a test genre
async fn create_test_genre(db: &DatabaseConnection, name: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let genre = genre::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = genre.insert(db).await.expect("Failed to create genre");
    res.id
}

// Helper to create a test language
async fn create_test_language(db: &DatabaseConnection, name: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let language = language::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = language.insert(db).await.expect("Failed to create language");
    res.id
}

// Helper to create a test author
async fn create_test_author(db: &DatabaseConnection, first_name: &str, last_name: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let author = author::ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = author.insert(db).await.expect("Failed to create author");
    res.id
}

// Helper to create a test borrower
async fn create_test_borrower(db: &DatabaseConnection, username: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let borrower = user::ActiveModel {
        username: Set(username.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = borrower.insert(db).await.expect("Failed to create borrower");
    res.id
}

// Helper to create a test book
async fn create_test_book(
    db: &DatabaseConnection,
    title: &str,
    author_id: Option<i32>,
    language_id: Option<i32>,
) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let book = book::ActiveModel {
        title: Set(title.to_string()),
        author_id: Set(author_id),
        summary: Set("A test summary.".to_string()),
        isbn: Set("9780000000000".to_string()),
        language_id: Set(language_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = book.insert(db).await.expect("Failed to create book");
    res.id
}

// Helper to create a test copy
async fn create_test_instance(
    db: &DatabaseConnection,
    book_id: Option<i32>,
    status: LoanStatus,
    due_back: Option<NaiveDate>,
    borrower_id: Option<i32>,
) -> String {
    let now = chrono::Utc::now().to_rfc3339();
    let instance = book_instance::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        book_id: Set(book_id),
        imprint: Set("Test Imprint, 2020".to_string()),
        due_back: Set(due_back),
        borrower_id: Set(borrower_id),
        status: Set(status),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    let res = instance.insert(db).await.expect("Failed to create instance");
    res.id
}

#[tokio::test]
async fn test_book_crud() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;
    let language_id = create_test_language(&db, "English").await;

    // 1. Create
    let book_id = create_test_book(&db, "Dune", Some(author_id), Some(language_id)).await;

    // 2. Read
    let found = book::Entity::find_by_id(book_id)
        .one(&db)
        .await
        .expect("Query failed")
        .expect("Book not found");
    assert_eq!(found.title, "Dune");
    assert_eq!(found.author_id, Some(author_id));

    // 3. Update
    let mut active: book::ActiveModel = found.into();
    active.title = Set("Dune Messiah".to_string());
    let updated = active.update(&db).await.expect("Update failed");
    assert_eq!(updated.title, "Dune Messiah");

    // 4. Delete
    book::Entity::delete_by_id(book_id)
        .exec(&db)
        .await
        .expect("Delete failed");
    let gone = book::Entity::find_by_id(book_id)
        .one(&db)
        .await
        .expect("Query failed");
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_deleting_author_keeps_books() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Ursula", "Le Guin").await;
    let book_id = create_test_book(&db, "The Dispossessed", Some(author_id), None).await;

    author::Entity::delete_by_id(author_id)
        .exec(&db)
        .await
        .expect("Delete failed");

    // The book survives with its author link cleared
    let book = book::Entity::find_by_id(book_id)
        .one(&db)
        .await
        .expect("Query failed")
        .expect("Book was deleted with its author");
    assert_eq!(book.author_id, None);
    assert_eq!(book.title, "The Dispossessed");
}

#[tokio::test]
async fn test_deleting_language_keeps_books() {
    let db = setup_test_db().await;
    let language_id = create_test_language(&db, "French").await;
    let book_id = create_test_book(&db, "Les Fleurs du mal", None, Some(language_id)).await;

    language::Entity::delete_by_id(language_id)
        .exec(&db)
        .await
        .expect("Delete failed");

    let book = book::Entity::find_by_id(book_id)
        .one(&db)
        .await
        .expect("Query failed")
        .expect("Book was deleted with its language");
    assert_eq!(book.language_id, None);
}

#[tokio::test]
async fn test_deleting_book_keeps_instances() {
    let db = setup_test_db().await;
    let book_id = create_test_book(&db, "Foundation", None, None).await;
    let instance_id =
        create_test_instance(&db, Some(book_id), LoanStatus::Available, None, None).await;

    book::Entity::delete_by_id(book_id)
        .exec(&db)
        .await
        .expect("Delete failed");

    // The copy survives with its book link cleared
    let instance = book_instance::Entity::find_by_id(instance_id.as_str())
        .one(&db)
        .await
        .expect("Query failed")
        .expect("Instance was deleted with its book");
    assert_eq!(instance.book_id, None);
    assert_eq!(instance.status, LoanStatus::Available);
}

#[tokio::test]
async fn test_deleting_borrower_keeps_instances() {
    let db = setup_test_db().await;
    let borrower_id = create_test_borrower(&db, "alice").await;
    let instance_id = create_test_instance(
        &db,
        None,
        LoanStatus::OnLoan,
        Some(date(2025, 6, 1)),
        Some(borrower_id),
    )
    .await;

    user::Entity::delete_by_id(borrower_id)
        .exec(&db)
        .await
        .expect("Delete failed");

    let instance = book_instance::Entity::find_by_id(instance_id.as_str())
        .one(&db)
        .await
        .expect("Query failed")
        .expect("Instance was deleted with its borrower");
    assert_eq!(instance.borrower_id, None);
    // The rest of the loan record is untouched
    assert_eq!(instance.due_back, Some(date(2025, 6, 1)));
    assert_eq!(instance.status, LoanStatus::OnLoan);
}

#[tokio::test]
async fn test_deleting_book_removes_genre_links() {
    let db = setup_test_db().await;
    let book_id = create_test_book(&db, "Dune", None, None).await;
    let genre_id = create_test_genre(&db, "Science Fiction").await;

    book_genres::ActiveModel {
        book_id: Set(book_id),
        genre_id: Set(genre_id),
    }
    .insert(&db)
    .await
    .expect("Failed to link genre");

    book::Entity::delete_by_id(book_id)
        .exec(&db)
        .await
        .expect("Delete failed");

    // Junction rows cascade away, the genre itself stays
    let links = book_genres::Entity::find()
        .filter(book_genres::Column::BookId.eq(book_id))
        .all(&db)
        .await
        .expect("Query failed");
    assert!(links.is_empty());

    let genre = genre::Entity::find_by_id(genre_id)
        .one(&db)
        .await
        .expect("Query failed");
    assert!(genre.is_some());
}

#[tokio::test]
async fn test_instance_status_defaults_to_maintenance() {
    let db = setup_test_db().await;
    let now = chrono::Utc::now().to_rfc3339();

    // Insert without setting status; the schema default applies
    let instance = book_instance::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        imprint: Set("Test Imprint, 2020".to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = instance.insert(&db).await.expect("Insert failed");

    assert_eq!(res.status, LoanStatus::Maintenance);
    assert_eq!(res.book_id, None);
    assert_eq!(res.due_back, None);
}

#[tokio::test]
async fn test_instances_ordered_by_due_date_undated_first() {
    let db = setup_test_db().await;
    create_test_instance(&db, None, LoanStatus::OnLoan, Some(date(2025, 7, 1)), None).await;
    create_test_instance(&db, None, LoanStatus::Available, None, None).await;
    create_test_instance(&db, None, LoanStatus::OnLoan, Some(date(2025, 6, 1)), None).await;

    let repo = SeaOrmBookInstanceRepository::new(db.clone());
    let instances = repo
        .find_all(None, date(2025, 1, 1))
        .await
        .expect("Query failed");

    let due_dates: Vec<Option<NaiveDate>> = instances.iter().map(|i| i.due_back).collect();
    assert_eq!(
        due_dates,
        vec![None, Some(date(2025, 6, 1)), Some(date(2025, 7, 1))]
    );
}

#[tokio::test]
async fn test_instance_status_filter() {
    let db = setup_test_db().await;
    create_test_instance(&db, None, LoanStatus::Available, None, None).await;
    create_test_instance(&db, None, LoanStatus::OnLoan, Some(date(2025, 6, 1)), None).await;
    create_test_instance(&db, None, LoanStatus::Available, None, None).await;

    let repo = SeaOrmBookInstanceRepository::new(db.clone());
    let available = repo
        .find_all(Some(LoanStatus::Available), date(2025, 1, 1))
        .await
        .expect("Query failed");

    assert_eq!(available.len(), 2);
    assert!(available.iter().all(|i| i.status == LoanStatus::Available));
}

#[tokio::test]
async fn test_overdue_flag_respects_given_date() {
    let db = setup_test_db().await;
    let book_id = create_test_book(&db, "Dune", None, None).await;
    let due_instance = create_test_instance(
        &db,
        Some(book_id),
        LoanStatus::OnLoan,
        Some(date(2024, 6, 14)),
        None,
    )
    .await;
    let undated_instance =
        create_test_instance(&db, Some(book_id), LoanStatus::Available, None, None).await;

    let repo = SeaOrmBookInstanceRepository::new(db.clone());

    // One day past due
    let row = repo
        .find_by_id(&due_instance, date(2024, 6, 15))
        .await
        .expect("Query failed")
        .expect("Instance not found");
    assert!(row.is_overdue);

    // On the due date itself the copy is not overdue yet
    let row = repo
        .find_by_id(&due_instance, date(2024, 6, 14))
        .await
        .expect("Query failed")
        .expect("Instance not found");
    assert!(!row.is_overdue);

    // No due date, never overdue
    let row = repo
        .find_by_id(&undated_instance, date(2099, 1, 1))
        .await
        .expect("Query failed")
        .expect("Instance not found");
    assert!(!row.is_overdue);
}

#[tokio::test]
async fn test_instance_rows_carry_book_title_and_display() {
    let db = setup_test_db().await;
    let book_id = create_test_book(&db, "Foundation", None, None).await;
    let with_book =
        create_test_instance(&db, Some(book_id), LoanStatus::Available, None, None).await;
    let orphan = create_test_instance(&db, None, LoanStatus::Maintenance, None, None).await;

    let repo = SeaOrmBookInstanceRepository::new(db.clone());

    let row = repo
        .find_by_id(&with_book, date(2025, 1, 1))
        .await
        .expect("Query failed")
        .expect("Instance not found");
    assert_eq!(row.book_title.as_deref(), Some("Foundation"));
    assert_eq!(row.display, format!("{} (Foundation)", with_book));
    assert_eq!(row.status_label, "Available");

    let row = repo
        .find_by_id(&orphan, date(2025, 1, 1))
        .await
        .expect("Query failed")
        .expect("Instance not found");
    assert_eq!(row.book_title, None);
    assert_eq!(row.display, format!("{} (Unknown)", orphan));
}

#[tokio::test]
async fn test_authors_ordered_by_last_then_first_name() {
    let db = setup_test_db().await;
    create_test_author(&db, "Frank", "Herbert").await;
    create_test_author(&db, "Janet", "Asimov").await;
    create_test_author(&db, "Isaac", "Asimov").await;

    let repo = SeaOrmAuthorRepository::new(db.clone());
    let authors = repo.find_all().await.expect("Query failed");

    let displays: Vec<&str> = authors.iter().map(|a| a.display.as_str()).collect();
    assert_eq!(
        displays,
        vec!["Asimov, Isaac", "Asimov, Janet", "Herbert, Frank"]
    );
}

#[tokio::test]
async fn test_book_repository_links_genres() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;
    let sf = create_test_genre(&db, "Science Fiction").await;
    let classics = create_test_genre(&db, "Classics").await;

    let repo = SeaOrmBookRepository::new(db.clone());

    // 1. Create with two genres
    let book = repo
        .create(BookInput {
            title: "Dune".to_string(),
            summary: "Spice and sandworms.".to_string(),
            isbn: "9780441172719".to_string(),
            author_id: Some(author_id),
            language_id: None,
            genre_ids: vec![sf, classics],
        })
        .await
        .expect("Create failed");

    assert_eq!(book.genre_ids, vec![sf, classics]);
    assert_eq!(book.author.as_deref(), Some("Herbert, Frank"));
    assert_eq!(book.detail_url, format!("/api/books/{}", book.id));

    // 2. Replace the genre set
    let book = repo
        .update(
            book.id,
            BookInput {
                title: "Dune".to_string(),
                summary: "Spice and sandworms.".to_string(),
                isbn: "9780441172719".to_string(),
                author_id: Some(author_id),
                language_id: None,
                genre_ids: vec![classics],
            },
        )
        .await
        .expect("Update failed");

    assert_eq!(book.genre_ids, vec![classics]);

    // 3. Unknown genre ids are rejected before touching the database
    let err = repo
        .create(BookInput {
            title: "Ghost".to_string(),
            summary: String::new(),
            isbn: String::new(),
            author_id: None,
            language_id: None,
            genre_ids: vec![9999],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_status_codes_round_trip() {
    use sea_orm::ActiveEnum;

    assert_eq!(LoanStatus::Maintenance.to_value(), "m");
    assert_eq!(LoanStatus::OnLoan.to_value(), "o");
    assert_eq!(LoanStatus::Available.to_value(), "a");
    assert_eq!(LoanStatus::Reserved.to_value(), "r");

    for status in [
        LoanStatus::Maintenance,
        LoanStatus::OnLoan,
        LoanStatus::Available,
        LoanStatus::Reserved,
    ] {
        let stored = status.to_value();
        let loaded = LoanStatus::try_from_value(&stored).expect("Code failed to load");
        assert_eq!(loaded, status);
    }

    assert!(LoanStatus::try_from_value(&"x".to_string()).is_err());
}
