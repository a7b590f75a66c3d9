//! Supplier entity - A company delivering supplier articles.
//!
//! Suppliers are either shared (no tenant) or owned by exactly one tenant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name shown in supplier comparisons
    pub name: String,
    /// Optional order contact address
    pub contact_email: Option<String>,
    /// Owning tenant, None for suppliers shared by all tenants
    pub tenant_id: Option<i64>,
    /// Inactive suppliers are hidden from listings
    pub is_active: bool,
    /// When the supplier was created
    pub created_at: DateTime,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One supplier offers many supplier articles
    #[sea_orm(has_many = "super::supplier_article::Entity")]
    SupplierArticles,
}

impl Related<super::supplier_article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierArticles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
