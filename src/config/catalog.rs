//! Catalog seed loading from catalog.toml
//!
//! The seed file describes categories, suppliers, neutral articles, supplier
//! articles and recipes. Entries reference each other by name (and supplier
//! articles by article number) so the file stays readable without database ids.
//! Seeding runs only against an empty store.

use crate::{
    core::{
        category::create_category,
        neutral_article::{NewNeutralArticle, create_neutral_article},
        recipe::{IngredientInput, NewRecipe, create_recipe},
        supplier::create_supplier,
        supplier_article::{NewSupplierArticle, create_supplier_article},
    },
    entities::{
        AllergenSet, Availability, BaseUnit, NeutralArticle, Nutrition, QualityGrade, Supplier,
    },
    errors::{Error, Result},
};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, PaginatorTrait,
    TransactionTrait,
};
use serde::Deserialize;
use std::{collections::HashMap, path::Path};
use tracing::{debug, info};

/// Structure of the whole catalog.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSeed {
    /// Article categories
    pub categories: Vec<CategorySeed>,
    /// Suppliers
    pub suppliers: Vec<SupplierSeed>,
    /// Supplier-independent articles
    pub neutral_articles: Vec<NeutralArticleSeed>,
    /// Purchasable supplier articles
    pub supplier_articles: Vec<SupplierArticleSeed>,
    /// Recipes with their ingredient lists
    pub recipes: Vec<RecipeSeed>,
}

/// A category entry
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    /// Unique category name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// A supplier entry
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierSeed {
    /// Unique supplier name
    pub name: String,
    /// Order contact
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Owning tenant
    #[serde(default)]
    pub tenant_id: Option<i64>,
}

/// A neutral article entry
#[derive(Debug, Clone, Deserialize)]
pub struct NeutralArticleSeed {
    /// Unique article name
    pub name: String,
    /// Name of a category declared in the same file
    #[serde(default)]
    pub category: Option<String>,
    /// `"kg"`, `"l"` or `"piece"`
    pub base_unit: BaseUnit,
    /// Lower price estimate per base unit
    pub estimated_price_min: f64,
    /// Upper price estimate per base unit
    pub estimated_price_max: f64,
    /// Nutrition per 100 g / 100 ml
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    /// Typical allergen codes
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// A supplier article entry
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierArticleSeed {
    /// Name of a supplier declared in the same file
    pub supplier: String,
    /// The supplier's SKU, unique within the file
    pub article_number: String,
    /// Article name as listed by the supplier
    pub name: String,
    /// Name of the neutral article this maps to
    #[serde(default)]
    pub neutral_article: Option<String>,
    /// Package price
    pub price: f64,
    /// Packaging unit, e.g. "5kg Packung"
    pub unit: String,
    /// Delivery availability
    #[serde(default = "default_availability")]
    pub availability: Availability,
    /// Days until delivery
    #[serde(default = "default_lead_time")]
    pub lead_time_days: i32,
    /// Nutrition per 100 g / 100 ml
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    /// Declared allergen codes
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Possible cross-contamination
    #[serde(default)]
    pub allergen_traces: Vec<String>,
    /// Certified organic
    #[serde(default)]
    pub is_organic: bool,
    /// Produced in the region
    #[serde(default)]
    pub is_regional: bool,
    /// Fairtrade certified
    #[serde(default)]
    pub is_fairtrade: bool,
    /// `"A"`, `"B"` or `"C"`
    #[serde(default = "default_quality_grade")]
    pub quality_grade: QualityGrade,
    /// Owning tenant
    #[serde(default)]
    pub tenant_id: Option<i64>,
}

/// A recipe entry
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSeed {
    /// Name of the dish
    pub name: String,
    /// Number of portions
    pub portions: i32,
    /// Owning tenant
    #[serde(default)]
    pub tenant_id: Option<i64>,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Ingredient lines in display order
    #[serde(default)]
    pub ingredients: Vec<IngredientSeed>,
}

/// One ingredient line of a recipe entry
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientSeed {
    /// Article number of the preferred supplier article
    #[serde(default)]
    pub supplier_article: Option<String>,
    /// Name of the neutral fallback article
    #[serde(default)]
    pub neutral_article: Option<String>,
    /// Amount in `unit`
    pub quantity: f64,
    /// Unit of the quantity
    pub unit: String,
    /// Kitchen note
    #[serde(default)]
    pub preparation_note: Option<String>,
    /// Whether the dish works without it
    #[serde(default)]
    pub is_optional: bool,
    /// Replacement ratio
    #[serde(default = "default_substitution_factor")]
    pub substitution_factor: f64,
}

const fn default_availability() -> Availability {
    Availability::Available
}

const fn default_lead_time() -> i32 {
    1
}

const fn default_quality_grade() -> QualityGrade {
    QualityGrade::B
}

const fn default_substitution_factor() -> f64 {
    1.0
}

/// Loads a catalog seed from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog_seed<P: AsRef<Path>>(path: P) -> Result<CatalogSeed> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {}: {e}", path.display()),
    })?;
    parse_catalog_seed(&contents)
}

/// Parses catalog seed TOML.
pub fn parse_catalog_seed(contents: &str) -> Result<CatalogSeed> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog seed: {e}"),
    })
}

/// Returns true if the store holds no suppliers and no neutral articles.
pub async fn catalog_is_empty<C>(db: &C) -> Result<bool>
where
    C: ConnectionTrait,
{
    let suppliers = Supplier::find().count(db).await?;
    let neutral_articles = NeutralArticle::find().count(db).await?;
    Ok(suppliers == 0 && neutral_articles == 0)
}

fn insert_unique(ids: &mut HashMap<String, i64>, kind: &str, key: &str, id: i64) -> Result<()> {
    if ids.insert(key.to_string(), id).is_some() {
        return Err(Error::Config {
            message: format!("Catalog seed declares {kind} {key:?} more than once"),
        });
    }
    Ok(())
}

fn lookup(ids: &HashMap<String, i64>, kind: &str, name: &str) -> Result<i64> {
    ids.get(name).copied().ok_or_else(|| Error::Config {
        message: format!("Catalog seed references unknown {kind} {name:?}"),
    })
}

fn lookup_optional(
    ids: &HashMap<String, i64>,
    kind: &str,
    name: Option<&String>,
) -> Result<Option<i64>> {
    name.map(|name| lookup(ids, kind, name)).transpose()
}

/// Writes a catalog seed into the store in a single transaction.
///
/// Returns `Ok(false)` without writing anything if the store already holds
/// suppliers or neutral articles. A failing entry rolls the whole seed back, so
/// a corrected file can be applied on the next run.
///
/// # Errors
/// Returns an error if an entry fails validation, references an unknown name,
/// declares a name twice, or an insert fails.
pub async fn seed_catalog(db: &DatabaseConnection, seed: &CatalogSeed) -> Result<bool> {
    let txn = db.begin().await?;

    if !catalog_is_empty(&txn).await? {
        info!("Catalog already populated, skipping seed");
        txn.rollback().await?;
        return Ok(false);
    }

    if let Err(e) = write_seed(&txn, seed).await {
        txn.rollback().await?;
        return Err(e);
    }
    Ok(())
}

async fn write_seed(txn: &DatabaseTransaction, seed: &CatalogSeed) -> Result<()> {
    let mut category_ids = HashMap::new();
    for entry in &seed.categories {
        let category =
            create_category(txn, entry.name.clone(), entry.description.clone()).await?;
        insert_unique(&mut category_ids, "category", &entry.name, category.id)?;
    }

    let mut supplier_ids = HashMap::new();
    for entry in &seed.suppliers {
        let supplier = create_supplier(
            txn,
            entry.name.clone(),
            entry.contact_email.clone(),
            entry.tenant_id,
        )
        .await?;
        insert_unique(&mut supplier_ids, "supplier", &entry.name, supplier.id)?;
    }

    let mut neutral_ids = HashMap::new();
    for entry in &seed.neutral_articles {
        let mut new_article = NewNeutralArticle::new(
            entry.name.clone(),
            entry.base_unit,
            entry.estimated_price_min,
            entry.estimated_price_max,
        );
        new_article.category_id =
            lookup_optional(&category_ids, "category", entry.category.as_ref())?;
        new_article.nutrition = entry.nutrition;
        new_article.common_allergens = AllergenSet::from_codes(&entry.allergens);
        new_article.description.clone_from(&entry.description);

        let article = create_neutral_article(txn, new_article).await?;
        insert_unique(&mut neutral_ids, "neutral article", &entry.name, article.id)?;
    }

    let mut supplier_article_ids = HashMap::new();
    for entry in &seed.supplier_articles {
        let mut new_article = NewSupplierArticle::new(
            lookup(&supplier_ids, "supplier", &entry.supplier)?,
            entry.article_number.clone(),
            entry.name.clone(),
            entry.price,
            entry.unit.clone(),
        );
        new_article.neutral_article_id =
            lookup_optional(&neutral_ids, "neutral article", entry.neutral_article.as_ref())?;
        new_article.availability = entry.availability;
        new_article.lead_time_days = entry.lead_time_days;
        new_article.nutrition = entry.nutrition;
        new_article.allergens = AllergenSet::from_codes(&entry.allergens);
        new_article.allergen_traces = AllergenSet::from_codes(&entry.allergen_traces);
        new_article.is_organic = entry.is_organic;
        new_article.is_regional = entry.is_regional;
        new_article.is_fairtrade = entry.is_fairtrade;
        new_article.quality_grade = entry.quality_grade;
        new_article.tenant_id = entry.tenant_id;

        let article = create_supplier_article(txn, new_article).await?;
        insert_unique(
            &mut supplier_article_ids,
            "article number",
            &entry.article_number,
            article.id,
        )?;
    }

    for entry in &seed.recipes {
        let ingredients = entry
            .ingredients
            .iter()
            .map(|line| -> Result<IngredientInput> {
                Ok(IngredientInput {
                    supplier_article_id: lookup_optional(
                        &supplier_article_ids,
                        "supplier article",
                        line.supplier_article.as_ref(),
                    )?,
                    neutral_article_id: lookup_optional(
                        &neutral_ids,
                        "neutral article",
                        line.neutral_article.as_ref(),
                    )?,
                    quantity: line.quantity,
                    unit: line.unit.clone(),
                    preparation_note: line.preparation_note.clone(),
                    is_optional: line.is_optional,
                    substitution_factor: line.substitution_factor,
                    sort_order: None,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut new_recipe = NewRecipe::new(entry.name.clone(), entry.portions);
        new_recipe.tenant_id = entry.tenant_id;
        new_recipe.description.clone_from(&entry.description);

        let recipe = create_recipe(txn, new_recipe, ingredients).await?;
        debug!(recipe_id = recipe.id, name = %recipe.name, "Seeded recipe");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{
        costing::calculate_recipe_cost, recipe::list_recipes, resolver::Confidence,
        supplier_article::get_supplier_article_by_number,
    };
    use crate::test_utils::setup_test_db;

    const GULASCH_TOML: &str = r#"
        [[categories]]
        name = "Fleisch"

        [[suppliers]]
        name = "Metro"
        contact_email = "bestellung@metro.example"

        [[neutral_articles]]
        name = "Rindfleisch"
        category = "Fleisch"
        base_unit = "kg"
        estimated_price_min = 10.0
        estimated_price_max = 16.0
        nutrition = { energy_kcal = 250.0, protein = 26.0, fat = 15.0 }

        [[neutral_articles]]
        name = "Paprikamark"
        base_unit = "kg"
        estimated_price_min = 8.0
        estimated_price_max = 14.0

        [[supplier_articles]]
        supplier = "Metro"
        article_number = "1005"
        name = "Rindergulasch"
        neutral_article = "Rindfleisch"
        price = 58.50
        unit = "5kg Packung"
        allergens = ["Celery"]
        quality_grade = "A"
        is_regional = true

        [[supplier_articles]]
        supplier = "Metro"
        article_number = "1009"
        name = "Paprikamark scharf"
        neutral_article = "Paprikamark"
        price = 24.90
        unit = "1kg Dose"

        [[recipes]]
        name = "Rindergulasch"
        portions = 100

        [[recipes.ingredients]]
        supplier_article = "1005"
        quantity = 50.0
        unit = "kg"

        [[recipes.ingredients]]
        supplier_article = "1009"
        neutral_article = "Paprikamark"
        quantity = 0.5
        unit = "kg"
    "#;

    #[test]
    fn test_parse_catalog_seed() {
        let seed = parse_catalog_seed(GULASCH_TOML).unwrap();
        assert_eq!(seed.categories.len(), 1);
        assert_eq!(seed.neutral_articles[0].base_unit, BaseUnit::Kilogram);
        assert_eq!(seed.neutral_articles[0].nutrition.unwrap().carbohydrates, 0.0);

        let beef = &seed.supplier_articles[0];
        assert_eq!(beef.quality_grade, QualityGrade::A);
        assert_eq!(beef.availability, Availability::Available);
        assert_eq!(beef.lead_time_days, 1);

        let paprika = &seed.supplier_articles[1];
        assert_eq!(paprika.quality_grade, QualityGrade::B);

        let recipe = &seed.recipes[0];
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1].substitution_factor, 1.0);
    }

    #[test]
    fn test_parse_catalog_seed_rejects_invalid_toml() {
        let result = parse_catalog_seed("[[suppliers]]\nname = ");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = parse_catalog_seed("[[neutral_articles]]\nname = \"X\"\nbase_unit = \"stone\"");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }

    #[test]
    fn test_load_catalog_seed_missing_file() {
        let result = load_catalog_seed("does-not-exist.toml");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }

    #[tokio::test]
    async fn test_seed_catalog_and_cost_recipe() -> Result<()> {
        let db = setup_test_db().await?;
        let seed = parse_catalog_seed(GULASCH_TOML)?;

        assert!(seed_catalog(&db, &seed).await?);

        let supplier_id = Supplier::find().one(&db).await?.unwrap().id;
        let beef = get_supplier_article_by_number(&db, supplier_id, "1005")
            .await?
            .unwrap();
        assert!(beef.allergens.contains("celery"));
        assert!(beef.is_regional);

        let recipes = list_recipes(&db, None).await?;
        assert_eq!(recipes.len(), 1);

        let summary = calculate_recipe_cost(&db, recipes[0].id).await?.unwrap();
        assert!((summary.total_cost - 597.45).abs() < 1e-9);
        assert_eq!(summary.confidence, Confidence::High);

        // A second run leaves the store untouched.
        assert!(!seed_catalog(&db, &seed).await?);
        assert_eq!(list_recipes(&db, None).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_unknown_reference() -> Result<()> {
        let db = setup_test_db().await?;
        let seed = parse_catalog_seed(
            r#"
            [[supplier_articles]]
            supplier = "Nobody"
            article_number = "X-1"
            name = "Ghost"
            price = 1.0
            unit = "1kg"
            "#,
        )?;

        let result = seed_catalog(&db, &seed).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_store_empty() -> Result<()> {
        let db = setup_test_db().await?;
        let broken = parse_catalog_seed(
            r#"
            [[suppliers]]
            name = "Metro"

            [[supplier_articles]]
            supplier = "Metro"
            article_number = "1005"
            name = "Rindergulasch"
            price = 0.0
            unit = "5kg Packung"
            "#,
        )?;

        let result = seed_catalog(&db, &broken).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: 0.0 }));
        assert!(catalog_is_empty(&db).await?);
        assert_eq!(Supplier::find().count(&db).await?, 0);

        // The corrected file is applied on the next run.
        let fixed = parse_catalog_seed(GULASCH_TOML)?;
        assert!(seed_catalog(&db, &fixed).await?);
        assert_eq!(list_recipes(&db, None).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_rejects_duplicate_article_numbers() -> Result<()> {
        let db = setup_test_db().await?;
        let seed = parse_catalog_seed(
            r#"
            [[suppliers]]
            name = "Metro"

            [[suppliers]]
            name = "Biohof Meier"

            [[supplier_articles]]
            supplier = "Metro"
            article_number = "100"
            name = "Tomaten"
            price = 15.9
            unit = "6kg Kiste"

            [[supplier_articles]]
            supplier = "Biohof Meier"
            article_number = "100"
            name = "Bio-Tomaten"
            price = 19.5
            unit = "5kg Kiste"
            "#,
        )?;

        let error = seed_catalog(&db, &seed).await.unwrap_err();
        assert!(matches!(error, Error::Config { .. }));
        assert!(error.to_string().contains("\"100\" more than once"));
        assert!(catalog_is_empty(&db).await?);

        Ok(())
    }
}
