//! Author entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Stored as ISO `YYYY-MM-DD`, may be unknown
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Canonical path where this author's record can be fetched
    pub fn detail_url(&self) -> String {
        crate::api::paths::author_detail(self.id)
    }
}

// Catalog listings show authors surname-first
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_surname_first() {
        let author = Model {
            id: 1,
            first_name: "Ursula".to_string(),
            last_name: "Le Guin".to_string(),
            date_of_birth: None,
            date_of_death: None,
            created_at: String::new(),
            updated_at: String::new(),
        };

        assert_eq!(author.to_string(), "Le Guin, Ursula");
        assert_eq!(author.detail_url(), "/api/authors/1");
    }
}
