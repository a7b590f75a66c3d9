//! Recipe entity - A dish with a number of portions and an ordered ingredient list.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    /// Unique identifier for the recipe
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the dish (e.g., "Rindergulasch")
    pub name: String,
    /// Number of portions the ingredient quantities yield
    pub portions: i32,
    /// Owning tenant, None for shared recipes
    pub tenant_id: Option<i64>,
    /// Free-text description
    pub description: Option<String>,
    /// When the recipe was created
    pub created_at: DateTime,
    /// When the recipe was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Recipe and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One recipe has many ingredients
    #[sea_orm(has_many = "super::recipe_ingredient::Entity")]
    Ingredients,
}

impl Related<super::recipe_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ingredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
