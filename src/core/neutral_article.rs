//! Neutral article business logic - Generic commodities used as costing fallback.
//!
//! Neutral articles are created by catalog seeding or when a supplier article
//! needs a mapping target. They are never deleted; maintenance only adjusts the
//! estimated price range.

use crate::{
    core::CURRENCY,
    entities::{AllergenSet, BaseUnit, Category, NeutralArticle, Nutrition, neutral_article},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Input for creating a neutral article.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNeutralArticle {
    /// Generic name
    pub name: String,
    /// Category, if any
    pub category_id: Option<i64>,
    /// Unit the price range refers to
    pub base_unit: BaseUnit,
    /// Averaged nutrition per 100 g / 100 ml
    pub nutrition: Option<Nutrition>,
    /// Commonly present allergens
    pub common_allergens: AllergenSet,
    /// Lower bound of the estimated price per base unit
    pub estimated_price_min: f64,
    /// Upper bound of the estimated price per base unit
    pub estimated_price_max: f64,
    /// Free-text description
    pub description: Option<String>,
}

impl NewNeutralArticle {
    /// A neutral article without category, nutrition or allergens.
    pub fn new(
        name: impl Into<String>,
        base_unit: BaseUnit,
        estimated_price_min: f64,
        estimated_price_max: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category_id: None,
            base_unit,
            nutrition: None,
            common_allergens: AllergenSet::default(),
            estimated_price_min,
            estimated_price_max,
            description: None,
        }
    }
}

fn validate_price_range(min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || min < 0.0 {
        return Err(Error::InvalidAmount { amount: min });
    }
    if !max.is_finite() {
        return Err(Error::InvalidAmount { amount: max });
    }
    if min > max {
        return Err(Error::InvalidPriceRange { min, max });
    }
    Ok(())
}

/// Creates a neutral article priced in EUR.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The price range is negative, not finite, or has `min > max`
/// - The referenced category does not exist
/// - The database insert fails
pub async fn create_neutral_article<C>(
    db: &C,
    new_article: NewNeutralArticle,
) -> Result<neutral_article::Model>
where
    C: ConnectionTrait,
{
    if new_article.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Neutral article name cannot be empty".to_string(),
        });
    }

    validate_price_range(new_article.estimated_price_min, new_article.estimated_price_max)?;

    if let Some(category_id) = new_article.category_id {
        Category::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or(Error::CategoryNotFound { id: category_id })?;
    }

    neutral_article::ActiveModel {
        name: Set(new_article.name.trim().to_string()),
        category_id: Set(new_article.category_id),
        base_unit: Set(new_article.base_unit),
        nutrition: Set(new_article.nutrition),
        common_allergens: Set(new_article.common_allergens),
        estimated_price_min: Set(new_article.estimated_price_min),
        estimated_price_max: Set(new_article.estimated_price_max),
        currency: Set(CURRENCY.to_string()),
        description: Set(new_article.description),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a neutral article by its unique ID.
pub async fn get_neutral_article_by_id(
    db: &DatabaseConnection,
    neutral_article_id: i64,
) -> Result<Option<neutral_article::Model>> {
    NeutralArticle::find_by_id(neutral_article_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a neutral article by its exact name.
pub async fn get_neutral_article_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<neutral_article::Model>> {
    NeutralArticle::find()
        .filter(neutral_article::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all neutral articles ordered alphabetically by name.
pub async fn list_neutral_articles(db: &DatabaseConnection) -> Result<Vec<neutral_article::Model>> {
    NeutralArticle::find()
        .order_by_asc(neutral_article::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replaces the estimated price range of a neutral article.
///
/// # Errors
/// Returns an error if the range is invalid, the article does not exist, or the
/// update fails.
pub async fn update_price_range(
    db: &DatabaseConnection,
    neutral_article_id: i64,
    min: f64,
    max: f64,
) -> Result<neutral_article::Model> {
    validate_price_range(min, max)?;

    let mut article: neutral_article::ActiveModel = NeutralArticle::find_by_id(neutral_article_id)
        .one(db)
        .await?
        .ok_or(Error::NeutralArticleNotFound {
            id: neutral_article_id,
        })?
        .into();

    article.estimated_price_min = Set(min);
    article.estimated_price_max = Set(max);
    article.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::category::create_category;
    use crate::test_utils::setup_test_db;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_neutral_article_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result =
            create_neutral_article(&db, NewNeutralArticle::new("", BaseUnit::Kilogram, 1.0, 2.0))
                .await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result = create_neutral_article(
            &db,
            NewNeutralArticle::new("Tomaten", BaseUnit::Kilogram, 3.0, 2.0),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidPriceRange { min: 3.0, max: 2.0 }
        ));

        let result = create_neutral_article(
            &db,
            NewNeutralArticle::new("Tomaten", BaseUnit::Kilogram, -1.0, 2.0),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -1.0 }
        ));

        let result = create_neutral_article(
            &db,
            NewNeutralArticle::new("Tomaten", BaseUnit::Kilogram, 1.0, f64::INFINITY),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_neutral_article_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let vegetables = create_category(&db, "Gemüse".to_string(), None).await?;

        let mut new_article = NewNeutralArticle::new("Tomaten", BaseUnit::Kilogram, 2.2, 3.5);
        new_article.category_id = Some(vegetables.id);
        new_article.common_allergens = AllergenSet::from_codes(["celery"]);
        new_article.nutrition = Some(Nutrition {
            energy_kcal: 18.0,
            ..Nutrition::default()
        });

        let tomatoes = create_neutral_article(&db, new_article).await?;
        assert_eq!(tomatoes.currency, "EUR");
        assert_eq!(tomatoes.base_unit, BaseUnit::Kilogram);

        let loaded = get_neutral_article_by_id(&db, tomatoes.id).await?.unwrap();
        assert_eq!(loaded, tomatoes);
        assert!(loaded.common_allergens.contains("celery"));
        assert_eq!(loaded.nutrition.unwrap().energy_kcal, 18.0);

        let by_name = get_neutral_article_by_name(&db, "Tomaten").await?.unwrap();
        assert_eq!(by_name.id, tomatoes.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_neutral_article_unknown_category() -> Result<()> {
        let db = setup_test_db().await?;

        let mut new_article = NewNeutralArticle::new("Milch", BaseUnit::Liter, 0.9, 1.3);
        new_article.category_id = Some(42);

        let result = create_neutral_article(&db, new_article).await;
        assert!(matches!(result.unwrap_err(), Error::CategoryNotFound { id: 42 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_price_range_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let onions = create_neutral_article(
            &db,
            NewNeutralArticle::new("Zwiebeln", BaseUnit::Kilogram, 1.0, 1.5),
        )
        .await?;

        let updated = update_price_range(&db, onions.id, 1.2, 1.9).await?;
        assert_eq!(updated.estimated_price_min, 1.2);
        assert_eq!(updated.estimated_price_max, 1.9);

        assert!(matches!(
            update_price_range(&db, onions.id, 2.0, 1.0).await.unwrap_err(),
            Error::InvalidPriceRange { .. }
        ));
        assert!(matches!(
            update_price_range(&db, 999, 1.0, 2.0).await.unwrap_err(),
            Error::NeutralArticleNotFound { id: 999 }
        ));

        let names: Vec<String> = list_neutral_articles(&db)
            .await?
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Zwiebeln".to_string()]);

        Ok(())
    }
}
