//! Supplier article business logic - Concrete, purchasable packagings.
//!
//! Supplier articles are onboarded with validation, updated when a supplier
//! changes price or availability, and retired by switching their status instead
//! of being deleted, so recipes that reference them keep a resolvable history.

use crate::{
    entities::{
        AllergenSet, ArticleStatus, Availability, NeutralArticle, Nutrition, QualityGrade,
        Supplier, SupplierArticle, supplier_article,
    },
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use tracing::info;

/// Input for onboarding a supplier article.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplierArticle {
    /// Supplier offering the article
    pub supplier_id: i64,
    /// The supplier's SKU
    pub article_number: String,
    /// Article name as listed by the supplier
    pub name: String,
    /// Neutral article this maps to
    pub neutral_article_id: Option<i64>,
    /// Package price in EUR
    pub price: f64,
    /// Packaging unit, e.g. "5kg Kiste"
    pub unit: String,
    /// Delivery availability
    pub availability: Availability,
    /// Days until delivery
    pub lead_time_days: i32,
    /// Nutrition per 100 g / 100 ml
    pub nutrition: Option<Nutrition>,
    /// Declared allergens
    pub allergens: AllergenSet,
    /// Possible cross-contamination
    pub allergen_traces: AllergenSet,
    /// Certified organic
    pub is_organic: bool,
    /// Produced in the region
    pub is_regional: bool,
    /// Fairtrade certified
    pub is_fairtrade: bool,
    /// Quality tier
    pub quality_grade: QualityGrade,
    /// Owning tenant, None for shared articles
    pub tenant_id: Option<i64>,
}

impl NewSupplierArticle {
    /// An available, unmapped, grade B article with one day lead time.
    pub fn new(
        supplier_id: i64,
        article_number: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            supplier_id,
            article_number: article_number.into(),
            name: name.into(),
            neutral_article_id: None,
            price,
            unit: unit.into(),
            availability: Availability::Available,
            lead_time_days: 1,
            nutrition: None,
            allergens: AllergenSet::default(),
            allergen_traces: AllergenSet::default(),
            is_organic: false,
            is_regional: false,
            is_fairtrade: false,
            quality_grade: QualityGrade::B,
            tenant_id: None,
        }
    }
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

async fn ensure_neutral_article_exists<C>(db: &C, id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    NeutralArticle::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::NeutralArticleNotFound { id })?;
    Ok(())
}

async fn find_for_update(
    db: &DatabaseConnection,
    supplier_article_id: i64,
) -> Result<supplier_article::ActiveModel> {
    let mut article: supplier_article::ActiveModel = SupplierArticle::find_by_id(supplier_article_id)
        .one(db)
        .await?
        .ok_or(Error::SupplierArticleNotFound {
            id: supplier_article_id,
        })?
        .into();
    article.updated_at = Set(chrono::Utc::now().naive_utc());
    Ok(article)
}

/// Onboards a new active supplier article.
///
/// # Errors
/// Returns an error if:
/// - The name or article number is empty
/// - The price is not a positive finite number
/// - The lead time is negative
/// - The supplier or the mapped neutral article does not exist
/// - The database insert fails
pub async fn create_supplier_article<C>(
    db: &C,
    new_article: NewSupplierArticle,
) -> Result<supplier_article::Model>
where
    C: ConnectionTrait,
{
    if new_article.name.trim().is_empty() || new_article.article_number.trim().is_empty() {
        return Err(Error::Config {
            message: "Supplier article name and article number cannot be empty".to_string(),
        });
    }

    validate_price(new_article.price)?;

    if new_article.lead_time_days < 0 {
        return Err(Error::Config {
            message: format!("Lead time cannot be negative: {}", new_article.lead_time_days),
        });
    }

    Supplier::find_by_id(new_article.supplier_id)
        .one(db)
        .await?
        .ok_or(Error::SupplierNotFound {
            id: new_article.supplier_id,
        })?;

    if let Some(neutral_article_id) = new_article.neutral_article_id {
        ensure_neutral_article_exists(db, neutral_article_id).await?;
    }

    let now = chrono::Utc::now().naive_utc();
    let article = supplier_article::ActiveModel {
        supplier_id: Set(new_article.supplier_id),
        article_number: Set(new_article.article_number.trim().to_string()),
        name: Set(new_article.name.trim().to_string()),
        neutral_article_id: Set(new_article.neutral_article_id),
        price: Set(new_article.price),
        unit: Set(new_article.unit.trim().to_string()),
        availability: Set(new_article.availability),
        lead_time_days: Set(new_article.lead_time_days),
        nutrition: Set(new_article.nutrition),
        allergens: Set(new_article.allergens),
        allergen_traces: Set(new_article.allergen_traces),
        is_organic: Set(new_article.is_organic),
        is_regional: Set(new_article.is_regional),
        is_fairtrade: Set(new_article.is_fairtrade),
        quality_grade: Set(new_article.quality_grade),
        tenant_id: Set(new_article.tenant_id),
        status: Set(ArticleStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        supplier_article_id = article.id,
        article_number = %article.article_number,
        "Onboarded supplier article"
    );
    Ok(article)
}

/// Retrieves a supplier article by its unique ID, regardless of status.
pub async fn get_supplier_article_by_id(
    db: &DatabaseConnection,
    supplier_article_id: i64,
) -> Result<Option<supplier_article::Model>> {
    SupplierArticle::find_by_id(supplier_article_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a supplier article by the supplier's SKU.
pub async fn get_supplier_article_by_number(
    db: &DatabaseConnection,
    supplier_id: i64,
    article_number: &str,
) -> Result<Option<supplier_article::Model>> {
    SupplierArticle::find()
        .filter(supplier_article::Column::SupplierId.eq(supplier_id))
        .filter(supplier_article::Column::ArticleNumber.eq(article_number))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists active supplier articles in id order. With a tenant, only shared
/// articles and the tenant's own articles are returned.
pub async fn list_active_supplier_articles(
    db: &DatabaseConnection,
    tenant_id: Option<i64>,
) -> Result<Vec<supplier_article::Model>> {
    let mut query = SupplierArticle::find()
        .filter(supplier_article::Column::Status.eq(ArticleStatus::Active))
        .order_by_asc(supplier_article::Column::Id);
    if let Some(tenant_id) = tenant_id {
        query = query.filter(
            Condition::any()
                .add(supplier_article::Column::TenantId.is_null())
                .add(supplier_article::Column::TenantId.eq(tenant_id)),
        );
    }
    query.all(db).await.map_err(Into::into)
}

/// Active supplier articles mapped to a neutral article, cheapest package first
/// (ties by id).
pub async fn list_alternatives_for_neutral(
    db: &DatabaseConnection,
    neutral_article_id: i64,
) -> Result<Vec<supplier_article::Model>> {
    SupplierArticle::find()
        .filter(supplier_article::Column::NeutralArticleId.eq(neutral_article_id))
        .filter(supplier_article::Column::Status.eq(ArticleStatus::Active))
        .order_by_asc(supplier_article::Column::Price)
        .order_by_asc(supplier_article::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records a new package price.
///
/// # Errors
/// Returns an error if the price is not positive, the article does not exist,
/// or the update fails.
pub async fn update_supplier_article_price(
    db: &DatabaseConnection,
    supplier_article_id: i64,
    price: f64,
) -> Result<supplier_article::Model> {
    validate_price(price)?;

    let mut article = find_for_update(db, supplier_article_id).await?;
    article.price = Set(price);
    article.update(db).await.map_err(Into::into)
}

/// Records a change in delivery availability.
///
/// # Errors
/// Returns an error if the article does not exist or the update fails.
pub async fn set_availability(
    db: &DatabaseConnection,
    supplier_article_id: i64,
    availability: Availability,
) -> Result<supplier_article::Model> {
    let mut article = find_for_update(db, supplier_article_id).await?;
    article.availability = Set(availability);
    article.update(db).await.map_err(Into::into)
}

/// Moves an article through its lifecycle (e.g. to `discontinued`).
///
/// # Errors
/// Returns an error if the article does not exist or the update fails.
pub async fn set_article_status(
    db: &DatabaseConnection,
    supplier_article_id: i64,
    status: ArticleStatus,
) -> Result<supplier_article::Model> {
    let mut article = find_for_update(db, supplier_article_id).await?;
    article.status = Set(status);
    let article = article.update(db).await?;

    info!(supplier_article_id, ?status, "Changed supplier article status");
    Ok(article)
}

/// Maps an article onto a neutral article, or removes the mapping with `None`.
///
/// # Errors
/// Returns an error if either article does not exist or the update fails.
pub async fn map_to_neutral_article(
    db: &DatabaseConnection,
    supplier_article_id: i64,
    neutral_article_id: Option<i64>,
) -> Result<supplier_article::Model> {
    if let Some(id) = neutral_article_id {
        ensure_neutral_article_exists(db, id).await?;
    }

    let mut article = find_for_update(db, supplier_article_id).await?;
    article.neutral_article_id = Set(neutral_article_id);
    article.update(db).await.map_err(Into::into)
}
