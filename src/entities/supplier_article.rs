//! Supplier article entity - One supplier's concrete, purchasable packaging of a product.
//!
//! A supplier article carries an exact package price and a free-text packaging unit
//! (e.g. "5kg Kiste") that the unit normalizer turns into a base quantity. Only
//! articles with `status = active` take part in resolution and supplier comparison;
//! articles are retired by switching their status rather than by deletion.

use super::values::{AllergenSet, Nutrition};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether the supplier can currently deliver the article
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// Can be ordered now
    #[sea_orm(string_value = "available")]
    Available,
    /// Temporarily out of stock
    #[sea_orm(string_value = "unavailable")]
    Unavailable,
    /// No longer produced by the supplier
    #[sea_orm(string_value = "discontinued")]
    Discontinued,
}

/// Lifecycle status of the catalog entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Eligible for resolution and comparison
    #[sea_orm(string_value = "active")]
    Active,
    /// Hidden from resolution, may be reactivated
    #[sea_orm(string_value = "inactive")]
    Inactive,
    /// Permanently retired
    #[sea_orm(string_value = "discontinued")]
    Discontinued,
}

/// Coarse quality tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum QualityGrade {
    /// Premium tier
    #[sea_orm(string_value = "A")]
    A,
    /// Standard tier
    #[sea_orm(string_value = "B")]
    B,
    /// Basic tier
    #[sea_orm(string_value = "C")]
    C,
}

/// Supplier article database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier_articles")]
pub struct Model {
    /// Unique identifier for the supplier article
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Supplier offering this article
    pub supplier_id: i64,
    /// The supplier's own SKU
    pub article_number: String,
    /// Article name as listed by the supplier
    pub name: String,
    /// Neutral article this maps to, if any
    pub neutral_article_id: Option<i64>,
    /// Price per package in EUR
    pub price: f64,
    /// Free-text packaging unit, e.g. "5kg Kiste" or "400ml Dose"
    pub unit: String,
    /// Delivery availability
    pub availability: Availability,
    /// Days between order and expected delivery
    pub lead_time_days: i32,
    /// Nutrition per 100 g / 100 ml
    pub nutrition: Option<Nutrition>,
    /// Declared allergens
    pub allergens: AllergenSet,
    /// Possible cross-contamination, distinct from declared allergens
    pub allergen_traces: AllergenSet,
    /// Certified organic
    pub is_organic: bool,
    /// Produced in the region
    pub is_regional: bool,
    /// Fairtrade certified
    pub is_fairtrade: bool,
    /// Quality tier
    pub quality_grade: QualityGrade,
    /// Owning tenant, None for articles shared by all tenants
    pub tenant_id: Option<i64>,
    /// Lifecycle status
    pub status: ArticleStatus,
    /// When the article was created
    pub created_at: DateTime,
    /// When the article was last modified
    pub updated_at: DateTime,
}

impl Model {
    /// Returns true if the article may back a recipe ingredient right now.
    #[must_use]
    pub fn is_orderable(&self) -> bool {
        self.status == ArticleStatus::Active && self.availability == Availability::Available
    }
}

/// Defines relationships between SupplierArticle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each supplier article belongs to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    /// Each supplier article may map to one neutral article
    #[sea_orm(
        belongs_to = "super::neutral_article::Entity",
        from = "Column::NeutralArticleId",
        to = "super::neutral_article::Column::Id"
    )]
    NeutralArticle,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::neutral_article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NeutralArticle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
