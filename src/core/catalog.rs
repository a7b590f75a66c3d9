//! In-memory catalog snapshot used by resolution, costing and supplier comparison.
//!
//! A `Catalog` is an explicit value handed to the pure costing functions instead
//! of shared global state. Request handlers load a fresh snapshot from the store
//! with [`Catalog::load`]; tests build one in memory with the `with_*` builders.
//! The snapshot is never mutated while a calculation runs.

use crate::{
    entities::{
        ArticleStatus, NeutralArticle, Supplier, SupplierArticle, SupplierArticleColumn,
        neutral_article, supplier, supplier_article,
    },
    errors::Result,
};
use sea_orm::{Condition, DatabaseConnection, QueryOrder, prelude::*};
use std::collections::HashMap;
use tracing::debug;

/// Which supplier articles a snapshot includes. Neutral articles and suppliers
/// are always global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogScope {
    /// Every supplier article of every tenant
    All,
    /// Only articles shared by all tenants
    Shared,
    /// Shared articles plus the ones owned by this tenant
    Tenant(i64),
}

impl CatalogScope {
    /// Scope for an operator view: a tenant sees its own and shared articles,
    /// no tenant sees everything.
    #[must_use]
    pub const fn for_tenant(tenant_id: Option<i64>) -> Self {
        match tenant_id {
            Some(tenant_id) => Self::Tenant(tenant_id),
            None => Self::All,
        }
    }

    /// Scope used to cost a recipe. A shared recipe never sees another
    /// tenant's private articles.
    #[must_use]
    pub const fn for_recipe(recipe_tenant_id: Option<i64>) -> Self {
        match recipe_tenant_id {
            Some(tenant_id) => Self::Tenant(tenant_id),
            None => Self::Shared,
        }
    }
}

/// Read-only view of neutral articles, supplier articles and suppliers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    neutral_articles: HashMap<i64, neutral_article::Model>,
    // Kept in id order so stable sorts downstream are deterministic.
    supplier_articles: Vec<supplier_article::Model>,
    suppliers: HashMap<i64, supplier::Model>,
}

impl Catalog {
    /// Builds a catalog from already loaded records.
    #[must_use]
    pub fn new(
        neutral_articles: Vec<neutral_article::Model>,
        mut supplier_articles: Vec<supplier_article::Model>,
        suppliers: Vec<supplier::Model>,
    ) -> Self {
        supplier_articles.sort_by_key(|article| article.id);
        Self {
            neutral_articles: neutral_articles.into_iter().map(|n| (n.id, n)).collect(),
            supplier_articles,
            suppliers: suppliers.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    /// Loads a snapshot of the store.
    ///
    /// With a `tenant_id`, only supplier articles owned by that tenant or shared
    /// by all tenants are included. Without one, every supplier article is
    /// included. Inactive articles are loaded as well so that callers can tell a
    /// retired article apart from an unknown id.
    pub async fn load(db: &DatabaseConnection, tenant_id: Option<i64>) -> Result<Self> {
        Self::load_scoped(db, CatalogScope::for_tenant(tenant_id)).await
    }

    /// Loads a snapshot whose supplier articles are limited to `scope`.
    pub async fn load_scoped(db: &DatabaseConnection, scope: CatalogScope) -> Result<Self> {
        let mut article_query = SupplierArticle::find().order_by_asc(SupplierArticleColumn::Id);
        match scope {
            CatalogScope::All => {}
            CatalogScope::Shared => {
                article_query = article_query.filter(SupplierArticleColumn::TenantId.is_null());
            }
            CatalogScope::Tenant(tenant_id) => {
                article_query = article_query.filter(
                    Condition::any()
                        .add(SupplierArticleColumn::TenantId.is_null())
                        .add(SupplierArticleColumn::TenantId.eq(tenant_id)),
                );
            }
        }

        let supplier_articles = article_query.all(db).await?;
        let neutral_articles = NeutralArticle::find().all(db).await?;
        let suppliers = Supplier::find().all(db).await?;

        debug!(
            ?scope,
            neutral = neutral_articles.len(),
            supplier_articles = supplier_articles.len(),
            "Loaded catalog snapshot"
        );

        Ok(Self::new(neutral_articles, supplier_articles, suppliers))
    }

    /// Adds or replaces a neutral article.
    #[must_use]
    pub fn with_neutral_article(mut self, article: neutral_article::Model) -> Self {
        self.neutral_articles.insert(article.id, article);
        self
    }

    /// Adds or replaces a supplier article, keeping id order.
    #[must_use]
    pub fn with_supplier_article(mut self, article: supplier_article::Model) -> Self {
        match self
            .supplier_articles
            .binary_search_by_key(&article.id, |existing| existing.id)
        {
            Ok(index) => self.supplier_articles[index] = article,
            Err(index) => self.supplier_articles.insert(index, article),
        }
        self
    }

    /// Adds or replaces a supplier.
    #[must_use]
    pub fn with_supplier(mut self, supplier: supplier::Model) -> Self {
        self.suppliers.insert(supplier.id, supplier);
        self
    }

    /// Looks up a neutral article by id.
    #[must_use]
    pub fn neutral_article(&self, id: i64) -> Option<&neutral_article::Model> {
        self.neutral_articles.get(&id)
    }

    /// Looks up a supplier article by id regardless of its status.
    #[must_use]
    pub fn supplier_article(&self, id: i64) -> Option<&supplier_article::Model> {
        self.supplier_articles
            .binary_search_by_key(&id, |article| article.id)
            .ok()
            .map(|index| &self.supplier_articles[index])
    }

    /// Looks up a supplier article by id among active articles only.
    #[must_use]
    pub fn active_supplier_article(&self, id: i64) -> Option<&supplier_article::Model> {
        self.supplier_article(id)
            .filter(|article| article.status == ArticleStatus::Active)
    }

    /// Active supplier articles mapped to the given neutral article, in id order.
    pub fn active_articles_for_neutral(
        &self,
        neutral_article_id: i64,
    ) -> impl Iterator<Item = &supplier_article::Model> {
        self.supplier_articles.iter().filter(move |article| {
            article.neutral_article_id == Some(neutral_article_id)
                && article.status == ArticleStatus::Active
        })
    }

    /// Display name of a supplier, if known.
    #[must_use]
    pub fn supplier_name(&self, supplier_id: i64) -> Option<&str> {
        self.suppliers
            .get(&supplier_id)
            .map(|supplier| supplier.name.as_str())
    }

    /// All neutral articles ordered by name.
    #[must_use]
    pub fn neutral_articles_by_name(&self) -> Vec<&neutral_article::Model> {
        let mut articles: Vec<_> = self.neutral_articles.values().collect();
        articles.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        articles
    }

    /// Number of supplier articles in the snapshot, any status.
    #[must_use]
    pub fn supplier_article_count(&self) -> usize {
        self.supplier_articles.len()
    }
}
