//! Neutral article entity - A generic commodity independent of any supplier.
//!
//! Neutral articles (e.g. "Tomatoes") carry an estimated price range and averaged
//! nutrition. They are the fallback a recipe ingredient resolves to when no
//! concrete supplier article can be used.

use super::values::{AllergenSet, Nutrition};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Base unit a neutral article is measured and priced in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum BaseUnit {
    /// Kilogram
    #[sea_orm(string_value = "kg")]
    #[serde(rename = "kg")]
    Kilogram,
    /// Liter
    #[sea_orm(string_value = "l")]
    #[serde(rename = "l")]
    Liter,
    /// Single piece
    #[sea_orm(string_value = "piece")]
    #[serde(rename = "piece")]
    Piece,
}

impl BaseUnit {
    /// Short unit symbol used in reports.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Liter => "l",
            Self::Piece => "piece",
        }
    }
}

/// Neutral article database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "neutral_articles")]
pub struct Model {
    /// Unique identifier for the neutral article
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Generic name (e.g., "Tomatoes", "Beef goulash meat")
    pub name: String,
    /// Category this article belongs to
    pub category_id: Option<i64>,
    /// Unit the price range refers to
    pub base_unit: BaseUnit,
    /// Averaged nutrition per 100 g / 100 ml
    pub nutrition: Option<Nutrition>,
    /// Allergens commonly present in this commodity
    pub common_allergens: AllergenSet,
    /// Lower bound of the estimated price per base unit
    pub estimated_price_min: f64,
    /// Upper bound of the estimated price per base unit
    pub estimated_price_max: f64,
    /// Currency of the price range
    pub currency: String,
    /// Free-text description
    pub description: Option<String>,
}

/// Defines relationships between NeutralArticle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each neutral article may belong to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// Many supplier articles map onto one neutral article
    #[sea_orm(has_many = "super::supplier_article::Entity")]
    SupplierArticles,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::supplier_article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierArticles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
