//! Book instance entity
//!
//! One row per physical copy of a book. Carries the loan state, the due
//! date, and an optional borrower. The id is a v4 uuid in canonical string
//! form so each copy stays uniquely addressable across the whole library,
//! even after its book record is gone.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Loan state of a single copy.
///
/// Stored as the single-character codes `m`/`o`/`a`/`r` so existing data
/// dumps keep loading; the JSON representation uses the readable names.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(1))")]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Copy is being repaired or catalogued and cannot circulate
    #[default]
    #[sea_orm(string_value = "m")]
    Maintenance,
    /// Copy is checked out to a borrower
    #[sea_orm(string_value = "o")]
    OnLoan,
    /// Copy is on the shelf
    #[sea_orm(string_value = "a")]
    Available,
    /// Copy is held for a borrower
    #[sea_orm(string_value = "r")]
    Reserved,
}

impl LoanStatus {
    /// Human-readable label for catalog listings
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_instances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub book_id: Option<i32>,
    /// Publisher and edition of this particular copy
    pub imprint: String,
    pub due_back: Option<Date>,
    pub borrower_id: Option<i32>,
    pub status: LoanStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Book,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BorrowerId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Borrower,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Borrower.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// True when a due date exists and lies strictly in the past.
    ///
    /// The current date is passed in by the caller (see
    /// [`crate::domain::Clock`]) instead of read from the wall clock here,
    /// so the check stays reproducible.
    pub fn is_overdue(&self, today: Date) -> bool {
        matches!(self.due_back, Some(due) if due < today)
    }

    /// Label shown in listings: the copy id plus the book title, or
    /// "Unknown" when the book record no longer exists.
    pub fn display_label(&self, book_title: Option<&str>) -> String {
        format!("{} ({})", self.id, book_title.unwrap_or("Unknown"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::ActiveEnum;

    fn instance(due_back: Option<NaiveDate>) -> Model {
        Model {
            id: "c153d287-7d31-4cf2-a1a5-a0b43d3b1f21".to_string(),
            book_id: Some(1),
            imprint: "Gollancz, 2011".to_string(),
            due_back,
            borrower_id: None,
            status: LoanStatus::OnLoan,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overdue_requires_a_past_due_date() {
        let today = date(2024, 6, 15);

        assert!(instance(Some(date(2024, 6, 14))).is_overdue(today));
        assert!(!instance(Some(date(2024, 6, 15))).is_overdue(today));
        assert!(!instance(Some(date(2024, 6, 16))).is_overdue(today));
        assert!(!instance(None).is_overdue(today));
    }

    #[test]
    fn status_defaults_to_maintenance() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
    }

    #[test]
    fn status_keeps_single_character_codes() {
        assert_eq!(LoanStatus::Maintenance.to_value(), "m");
        assert_eq!(LoanStatus::OnLoan.to_value(), "o");
        assert_eq!(LoanStatus::Available.to_value(), "a");
        assert_eq!(LoanStatus::Reserved.to_value(), "r");
    }

    #[test]
    fn status_labels_read_naturally() {
        assert_eq!(LoanStatus::OnLoan.label(), "On loan");
        assert_eq!(LoanStatus::Available.label(), "Available");
    }

    #[test]
    fn display_label_falls_back_when_book_is_gone() {
        let copy = instance(None);

        assert_eq!(
            copy.display_label(Some("The Dispossessed")),
            "c153d287-7d31-4cf2-a1a5-a0b43d3b1f21 (The Dispossessed)"
        );
        assert_eq!(
            copy.display_label(None),
            "c153d287-7d31-4cf2-a1a5-a0b43d3b1f21 (Unknown)"
        );
    }
}
