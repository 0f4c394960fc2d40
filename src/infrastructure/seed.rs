//! Demo catalog data, loaded when SEED_DEMO is set

use sea_orm::*;

use crate::models::{LoanStatus, author, book, book_genres, book_instance, genre, language, user};

/// Populate an empty catalog with a small demo dataset.
///
/// Skips entirely once books exist, so restarting with SEED_DEMO set does
/// not duplicate rows.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if book::Entity::find().count(db).await? > 0 {
        tracing::info!("Catalog already has books, skipping demo seed");
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();

    // 1. Genres
    let fantasy = genre::ActiveModel {
        name: Set("Fantasy".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let science_fiction = genre::ActiveModel {
        name: Set("Science Fiction".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    genre::ActiveModel {
        name: Set("French Poetry".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // 2. Languages
    let english = language::ActiveModel {
        name: Set("English".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    language::ActiveModel {
        name: Set("French".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    language::ActiveModel {
        name: Set("Japanese".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // 3. Borrowers
    let alice = user::ActiveModel {
        username: Set("alice".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let bob = user::ActiveModel {
        username: Set("bob".to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // 4. Authors
    let herbert = author::ActiveModel {
        first_name: Set("Frank".to_owned()),
        last_name: Set("Herbert".to_owned()),
        date_of_birth: Set(chrono::NaiveDate::from_ymd_opt(1920, 10, 8)),
        date_of_death: Set(chrono::NaiveDate::from_ymd_opt(1986, 2, 11)),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let tolkien = author::ActiveModel {
        first_name: Set("J.R.R.".to_owned()),
        last_name: Set("Tolkien".to_owned()),
        date_of_birth: Set(chrono::NaiveDate::from_ymd_opt(1892, 1, 3)),
        date_of_death: Set(chrono::NaiveDate::from_ymd_opt(1973, 9, 2)),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let asimov = author::ActiveModel {
        first_name: Set("Isaac".to_owned()),
        last_name: Set("Asimov".to_owned()),
        date_of_birth: Set(chrono::NaiveDate::from_ymd_opt(1920, 1, 2)),
        date_of_death: Set(chrono::NaiveDate::from_ymd_opt(1992, 4, 6)),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // 5. Books
    let dune = book::ActiveModel {
        title: Set("Dune".to_owned()),
        author_id: Set(Some(herbert.id)),
        summary: Set("Paul Atreides and his family take control of the desert planet Arrakis, sole source of the spice melange.".to_owned()),
        isbn: Set("9780441172719".to_owned()),
        language_id: Set(Some(english.id)),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let hobbit = book::ActiveModel {
        title: Set("The Hobbit".to_owned()),
        author_id: Set(Some(tolkien.id)),
        summary: Set("Bilbo Baggins is swept into a quest to reclaim the dwarves' mountain home from the dragon Smaug.".to_owned()),
        isbn: Set("9780547928227".to_owned()),
        language_id: Set(Some(english.id)),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let foundation = book::ActiveModel {
        title: Set("Foundation".to_owned()),
        author_id: Set(Some(asimov.id)),
        summary: Set("Hari Seldon's psychohistory predicts the fall of the Galactic Empire and a dark age only the Foundation can shorten.".to_owned()),
        isbn: Set("9780553293357".to_owned()),
        language_id: Set(Some(english.id)),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for (book_id, genre_id) in [
        (dune.id, science_fiction.id),
        (hobbit.id, fantasy.id),
        (foundation.id, science_fiction.id),
    ] {
        book_genres::ActiveModel {
            book_id: Set(book_id),
            genre_id: Set(genre_id),
        }
        .insert(db)
        .await?;
    }

    // 6. Copies: one on loan, one reserved, the rest shelved or in repair
    let today = chrono::Local::now().date_naive();

    let copies = [
        (dune.id, "Ace Books, 1990", LoanStatus::Available, None, None),
        (
            dune.id,
            "Ace Books, 1990",
            LoanStatus::OnLoan,
            Some(today + chrono::Days::new(14)),
            Some(alice.id),
        ),
        (hobbit.id, "Houghton Mifflin, 2012", LoanStatus::Maintenance, None, None),
        (hobbit.id, "Houghton Mifflin, 2012", LoanStatus::Available, None, None),
        (
            foundation.id,
            "Bantam Spectra, 1991",
            LoanStatus::Reserved,
            Some(today + chrono::Days::new(7)),
            Some(bob.id),
        ),
    ];

    for (book_id, imprint, status, due_back, borrower_id) in copies {
        book_instance::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            book_id: Set(Some(book_id)),
            imprint: Set(imprint.to_owned()),
            due_back: Set(due_back),
            borrower_id: Set(borrower_id),
            status: Set(status),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}
