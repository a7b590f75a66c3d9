//! Shared test utilities for the catering backend.
//!
//! Database helpers create an in-memory `SQLite` store and seed it through the
//! regular core operations. Fixture helpers build plain models for the pure
//! costing pipeline, which only needs a [`crate::core::catalog::Catalog`].

use crate::{
    core::{
        neutral_article::{NewNeutralArticle, create_neutral_article},
        recipe::{NewRecipe, create_recipe},
        supplier::create_supplier,
        supplier_article::{NewSupplierArticle, create_supplier_article},
    },
    entities::{
        AllergenSet, ArticleStatus, Availability, BaseUnit, QualityGrade, neutral_article,
        recipe, recipe_ingredient, supplier, supplier_article,
    },
    errors::Result,
};
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up a database holding one supplier and one neutral article.
/// Returns (db, supplier, neutral article) for catalog-related tests.
///
/// # Defaults
/// * supplier name: `"Test Supplier"`
/// * neutral article: `"Test Article"`, base unit kg, estimated 2.0 - 4.0 EUR
pub async fn setup_with_catalog() -> Result<(
    DatabaseConnection,
    supplier::Model,
    neutral_article::Model,
)> {
    let db = setup_test_db().await?;
    let supplier = create_supplier(&db, "Test Supplier".to_string(), None, None).await?;
    let neutral = create_neutral_article(
        &db,
        NewNeutralArticle::new("Test Article", BaseUnit::Kilogram, 2.0, 4.0),
    )
    .await?;
    Ok((db, supplier, neutral))
}

/// Creates a test supplier article sold in a `"1kg Kiste"`.
pub async fn create_test_supplier_article(
    db: &DatabaseConnection,
    supplier_id: i64,
    neutral_article_id: Option<i64>,
    article_number: &str,
    price: f64,
) -> Result<supplier_article::Model> {
    let mut new_article = NewSupplierArticle::new(
        supplier_id,
        article_number,
        format!("Test Article {article_number}"),
        price,
        "1kg Kiste",
    );
    new_article.neutral_article_id = neutral_article_id;
    create_supplier_article(db, new_article).await
}

/// Creates a shared test recipe without ingredients.
pub async fn create_test_recipe(
    db: &DatabaseConnection,
    name: &str,
    portions: i32,
) -> Result<recipe::Model> {
    create_recipe(db, NewRecipe::new(name, portions), Vec::new()).await
}

fn fixture_timestamp() -> NaiveDateTime {
    NaiveDateTime::default()
}

/// An active, available, grade B supplier article with no flags and no mapping.
/// The article number is `"ART-{id}"`.
#[must_use]
pub fn supplier_article_fixture(
    id: i64,
    supplier_id: i64,
    price: f64,
    unit: &str,
) -> supplier_article::Model {
    supplier_article::Model {
        id,
        supplier_id,
        article_number: format!("ART-{id}"),
        name: format!("Article {id}"),
        neutral_article_id: None,
        price,
        unit: unit.to_string(),
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
        status: ArticleStatus::Active,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

/// A neutral article measured in kg with the given price estimate.
#[must_use]
pub fn neutral_article_fixture(
    id: i64,
    name: &str,
    estimated_price_min: f64,
    estimated_price_max: f64,
) -> neutral_article::Model {
    neutral_article::Model {
        id,
        name: name.to_string(),
        category_id: None,
        base_unit: BaseUnit::Kilogram,
        nutrition: None,
        common_allergens: AllergenSet::default(),
        estimated_price_min,
        estimated_price_max,
        currency: crate::core::CURRENCY.to_string(),
        description: None,
    }
}

/// An active shared supplier.
#[must_use]
pub fn supplier_fixture(id: i64, name: &str) -> supplier::Model {
    supplier::Model {
        id,
        name: name.to_string(),
        contact_email: None,
        tenant_id: None,
        is_active: true,
        created_at: fixture_timestamp(),
    }
}

/// A shared recipe.
#[must_use]
pub fn recipe_fixture(id: i64, name: &str, portions: i32) -> recipe::Model {
    recipe::Model {
        id,
        name: name.to_string(),
        portions,
        tenant_id: None,
        description: None,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

/// A mandatory ingredient line without article references, at sort order 0.
#[must_use]
pub fn ingredient_fixture(
    id: i64,
    recipe_id: i64,
    quantity: f64,
    unit: &str,
) -> recipe_ingredient::Model {
    recipe_ingredient::Model {
        id,
        recipe_id,
        supplier_article_id: None,
        neutral_article_id: None,
        quantity,
        unit: unit.to_string(),
        preparation_note: None,
        is_optional: false,
        substitution_factor: 1.0,
        sort_order: 0,
    }
}
