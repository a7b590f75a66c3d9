//! Supplier comparison - ranks the supplier articles behind one neutral article.
//!
//! This backs the "find a cheaper or better supplier" workflow. It is independent
//! of resolution: the resolver never consults this ranking.

use crate::{
    core::{
        catalog::Catalog,
        scoring::{quality_score, sustainability_score},
        units::price_per_base_unit,
    },
    entities::{Availability, supplier_article},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// One supplier offer for a neutral article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Supplier article being offered
    pub supplier_article_id: i64,
    /// Supplier offering it
    pub supplier_id: i64,
    /// Supplier display name
    pub supplier_name: Option<String>,
    /// The supplier's SKU
    pub article_number: String,
    /// Article name as listed by the supplier
    pub article_name: String,
    /// Package price in EUR
    pub price: f64,
    /// Packaging unit
    pub unit: String,
    /// Package price divided by the normalized package quantity
    pub price_per_base_unit: f64,
    /// Delivery availability
    pub availability: Availability,
    /// Days until delivery
    pub lead_time_days: i32,
    /// Quality points (0-100)
    pub quality_score: u8,
    /// Sustainability points (0-100)
    pub sustainability_score: u8,
}

/// Active supplier articles mapped to a neutral article, cheapest package first.
///
/// Ties keep catalog (id) order.
#[must_use]
pub fn find_alternative_supplier_articles(
    catalog: &Catalog,
    neutral_article_id: i64,
) -> Vec<&supplier_article::Model> {
    let mut articles: Vec<_> = catalog.active_articles_for_neutral(neutral_article_id).collect();
    articles.sort_by(|a, b| a.price.total_cmp(&b.price));
    articles
}

/// Supplier offers for a neutral article ranked by package price, enriched with
/// supplier names and scores.
#[must_use]
pub fn compare_suppliers(catalog: &Catalog, neutral_article_id: i64) -> Vec<ComparisonRow> {
    find_alternative_supplier_articles(catalog, neutral_article_id)
        .into_iter()
        .map(|article| ComparisonRow {
            supplier_article_id: article.id,
            supplier_id: article.supplier_id,
            supplier_name: catalog.supplier_name(article.supplier_id).map(str::to_string),
            article_number: article.article_number.clone(),
            article_name: article.name.clone(),
            price: article.price,
            unit: article.unit.clone(),
            price_per_base_unit: price_per_base_unit(article.price, &article.unit),
            availability: article.availability,
            lead_time_days: article.lead_time_days,
            quality_score: quality_score(article),
            sustainability_score: sustainability_score(article),
        })
        .collect()
}

/// Loads a catalog view for `tenant_id` and compares the suppliers of a neutral
/// article.
///
/// # Errors
/// Returns an error if loading the catalog fails.
pub async fn load_supplier_comparison(
    db: &DatabaseConnection,
    neutral_article_id: i64,
    tenant_id: Option<i64>,
) -> Result<Vec<ComparisonRow>> {
    let catalog = Catalog::load(db, tenant_id).await?;
    Ok(compare_suppliers(&catalog, neutral_article_id))
}
