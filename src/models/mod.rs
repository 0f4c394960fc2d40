//! SeaORM entities, one module per table

pub mod author;
pub mod book;
pub mod book_genres;
pub mod book_instance;
pub mod genre;
pub mod language;
pub mod user;

pub use book_instance::LoanStatus;
