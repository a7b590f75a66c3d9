//! Recipe ingredient entity - One line item of a recipe.
//!
//! An ingredient names what is needed and how to source it: `supplier_article_id`
//! is the preferred source, `neutral_article_id` the documented fallback. Both may
//! be set; at least one must be.

use crate::core::resolver::ArticleRef;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe ingredient database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_ingredients")]
pub struct Model {
    /// Unique identifier for the ingredient line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Recipe this line belongs to
    pub recipe_id: i64,
    /// Preferred concrete article
    pub supplier_article_id: Option<i64>,
    /// Fallback generic article
    pub neutral_article_id: Option<i64>,
    /// Amount needed for the whole recipe
    pub quantity: f64,
    /// Unit of `quantity` (e.g., "kg", "g", "piece")
    pub unit: String,
    /// Free-text preparation note (e.g., "diced")
    pub preparation_note: Option<String>,
    /// Whether the dish can be made without this ingredient
    pub is_optional: bool,
    /// Ratio for converting the quantity when the resolved packaging differs
    pub substitution_factor: f64,
    /// Display position inside the recipe
    pub sort_order: i32,
}

impl Model {
    /// The pair of article references used for resolution.
    #[must_use]
    pub const fn article_ref(&self) -> ArticleRef {
        ArticleRef {
            supplier_article_id: self.supplier_article_id,
            neutral_article_id: self.neutral_article_id,
        }
    }
}

/// Defines relationships between RecipeIngredient and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ingredient belongs to one recipe
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id",
        on_delete = "Cascade"
    )]
    Recipe,
    /// Preferred supplier article
    #[sea_orm(
        belongs_to = "super::supplier_article::Entity",
        from = "Column::SupplierArticleId",
        to = "super::supplier_article::Column::Id"
    )]
    SupplierArticle,
    /// Fallback neutral article
    #[sea_orm(
        belongs_to = "super::neutral_article::Entity",
        from = "Column::NeutralArticleId",
        to = "super::neutral_article::Column::Id"
    )]
    NeutralArticle,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl Related<super::supplier_article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierArticle.def()
    }
}

impl Related<super::neutral_article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NeutralArticle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
