//! Category entity - Groups neutral articles (e.g. "Vegetables", "Meat").

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the category
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category groups many neutral articles
    #[sea_orm(has_many = "super::neutral_article::Entity")]
    NeutralArticles,
}

impl Related<super::neutral_article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NeutralArticles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
