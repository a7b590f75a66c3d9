//! Recipe business logic - Handles recipes and their ingredient lists.
//!
//! Recipes are created together with their ingredients inside one database
//! transaction. Every ingredient must reference a supplier article, a neutral
//! article, or both; the supplier article is preferred during resolution and the
//! neutral article is its documented fallback.

use crate::{
    core::resolver::ArticleRef,
    entities::{
        NeutralArticle, Recipe, RecipeIngredient, SupplierArticle, recipe, recipe_ingredient,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Input for creating a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    /// Name of the dish
    pub name: String,
    /// Number of portions the quantities yield
    pub portions: i32,
    /// Owning tenant, None for shared recipes
    pub tenant_id: Option<i64>,
    /// Free-text description
    pub description: Option<String>,
}

impl NewRecipe {
    /// A shared recipe without description.
    pub fn new(name: impl Into<String>, portions: i32) -> Self {
        Self {
            name: name.into(),
            portions,
            tenant_id: None,
            description: None,
        }
    }
}

/// Input for one ingredient line, before it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientInput {
    /// Preferred concrete article
    pub supplier_article_id: Option<i64>,
    /// Fallback generic article
    pub neutral_article_id: Option<i64>,
    /// Amount needed for the whole recipe
    pub quantity: f64,
    /// Unit of `quantity`
    pub unit: String,
    /// Free-text preparation note
    pub preparation_note: Option<String>,
    /// Whether the dish can be made without this ingredient
    pub is_optional: bool,
    /// Packaging conversion ratio, 1.0 when the packaging matches
    pub substitution_factor: f64,
    /// Explicit display position; appended at the end when None
    pub sort_order: Option<i32>,
}

impl IngredientInput {
    /// An ingredient sourced from a specific supplier article.
    pub fn supplier(supplier_article_id: i64, quantity: f64, unit: impl Into<String>) -> Self {
        Self::with_refs(Some(supplier_article_id), None, quantity, unit)
    }

    /// An ingredient sourced from a neutral article only.
    pub fn neutral(neutral_article_id: i64, quantity: f64, unit: impl Into<String>) -> Self {
        Self::with_refs(None, Some(neutral_article_id), quantity, unit)
    }

    /// Adds a neutral article as fallback.
    #[must_use]
    pub const fn with_neutral_fallback(mut self, neutral_article_id: i64) -> Self {
        self.neutral_article_id = Some(neutral_article_id);
        self
    }

    fn with_refs(
        supplier_article_id: Option<i64>,
        neutral_article_id: Option<i64>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            supplier_article_id,
            neutral_article_id,
            quantity,
            unit: unit.into(),
            preparation_note: None,
            is_optional: false,
            substitution_factor: 1.0,
            sort_order: None,
        }
    }

    /// The pair of article references used for resolution.
    #[must_use]
    pub const fn article_ref(&self) -> ArticleRef {
        ArticleRef {
            supplier_article_id: self.supplier_article_id,
            neutral_article_id: self.neutral_article_id,
        }
    }
}

/// Checks an ingredient line without touching the database.
///
/// # Errors
/// Returns an error if:
/// - Neither article reference is set
/// - The quantity is not a positive finite number
/// - The substitution factor is not a positive finite number
pub fn validate_ingredient_input(input: &IngredientInput) -> Result<()> {
    if !input.article_ref().is_present() {
        return Err(Error::MissingArticleReference);
    }

    if !input.quantity.is_finite() || input.quantity <= 0.0 {
        return Err(Error::InvalidQuantity {
            quantity: input.quantity,
        });
    }

    if !input.substitution_factor.is_finite() || input.substitution_factor <= 0.0 {
        return Err(Error::InvalidQuantity {
            quantity: input.substitution_factor,
        });
    }

    Ok(())
}

/// Creates a recipe and its ingredients in a single transaction.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or the portion count is not positive
/// - Any ingredient fails validation or references an unknown article
/// - A database operation fails (nothing is persisted in that case)
pub async fn create_recipe<C>(
    db: &C,
    new_recipe: NewRecipe,
    ingredients: Vec<IngredientInput>,
) -> Result<recipe::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    if new_recipe.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Recipe name cannot be empty".to_string(),
        });
    }

    if new_recipe.portions <= 0 {
        return Err(Error::Config {
            message: format!("Recipe must yield at least one portion, got {}", new_recipe.portions),
        });
    }

    for input in &ingredients {
        validate_ingredient_input(input)?;
    }

    let txn = db.begin().await?;

    let now = chrono::Utc::now().naive_utc();
    let recipe = recipe::ActiveModel {
        name: Set(new_recipe.name.trim().to_string()),
        portions: Set(new_recipe.portions),
        tenant_id: Set(new_recipe.tenant_id),
        description: Set(new_recipe.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for input in ingredients {
        add_ingredient(&txn, recipe.id, input).await?;
    }

    txn.commit().await?;

    info!(recipe_id = recipe.id, name = %recipe.name, "Created recipe");
    Ok(recipe)
}

/// Appends an ingredient to an existing recipe.
///
/// Generic over the connection so it can run inside a surrounding transaction.
///
/// # Errors
/// Returns an error if the input is invalid, the recipe does not exist, a
/// referenced article does not exist, or the insert fails.
pub async fn add_ingredient<C>(
    db: &C,
    recipe_id: i64,
    input: IngredientInput,
) -> Result<recipe_ingredient::Model>
where
    C: ConnectionTrait,
{
    validate_ingredient_input(&input)?;

    Recipe::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or(Error::RecipeNotFound { id: recipe_id })?;

    if let Some(id) = input.supplier_article_id {
        SupplierArticle::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::SupplierArticleNotFound { id })?;
    }

    if let Some(id) = input.neutral_article_id {
        NeutralArticle::find_by_id(id)
            .one(db)
            .await?
            .ok_or(Error::NeutralArticleNotFound { id })?;
    }

    let sort_order = match input.sort_order {
        Some(sort_order) => sort_order,
        None => next_sort_order(db, recipe_id).await?,
    };

    let ingredient = recipe_ingredient::ActiveModel {
        recipe_id: Set(recipe_id),
        supplier_article_id: Set(input.supplier_article_id),
        neutral_article_id: Set(input.neutral_article_id),
        quantity: Set(input.quantity),
        unit: Set(input.unit.trim().to_string()),
        preparation_note: Set(input.preparation_note),
        is_optional: Set(input.is_optional),
        substitution_factor: Set(input.substitution_factor),
        sort_order: Set(sort_order),
        ..Default::default()
    };

    ingredient.insert(db).await.map_err(Into::into)
}

async fn next_sort_order<C>(db: &C, recipe_id: i64) -> Result<i32>
where
    C: ConnectionTrait,
{
    let last = RecipeIngredient::find()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .order_by_desc(recipe_ingredient::Column::SortOrder)
        .limit(1)
        .one(db)
        .await?;

    Ok(last.map_or(0, |ingredient| ingredient.sort_order + 1))
}

/// Retrieves a recipe by its unique ID.
pub async fn get_recipe_by_id(
    db: &DatabaseConnection,
    recipe_id: i64,
) -> Result<Option<recipe::Model>> {
    Recipe::find_by_id(recipe_id).one(db).await.map_err(Into::into)
}

/// Lists recipes ordered by name. With a tenant, shared recipes and the tenant's
/// own recipes are returned.
pub async fn list_recipes(
    db: &DatabaseConnection,
    tenant_id: Option<i64>,
) -> Result<Vec<recipe::Model>> {
    let mut query = Recipe::find().order_by_asc(recipe::Column::Name);
    if let Some(tenant_id) = tenant_id {
        query = query.filter(
            sea_orm::Condition::any()
                .add(recipe::Column::TenantId.is_null())
                .add(recipe::Column::TenantId.eq(tenant_id)),
        );
    }
    query.all(db).await.map_err(Into::into)
}

/// Retrieves the ingredients of a recipe in display order.
pub async fn get_ingredients_for_recipe(
    db: &DatabaseConnection,
    recipe_id: i64,
) -> Result<Vec<recipe_ingredient::Model>> {
    RecipeIngredient::find()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .order_by_asc(recipe_ingredient::Column::SortOrder)
        .order_by_asc(recipe_ingredient::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes one ingredient line.
///
/// # Errors
/// Returns an error if the ingredient does not exist or the delete fails.
pub async fn remove_ingredient(db: &DatabaseConnection, ingredient_id: i64) -> Result<()> {
    let result = RecipeIngredient::delete_by_id(ingredient_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::IngredientNotFound { id: ingredient_id });
    }
    Ok(())
}

/// Deletes a recipe together with all of its ingredients.
///
/// # Errors
/// Returns an error if the recipe does not exist or a delete fails.
pub async fn delete_recipe(db: &DatabaseConnection, recipe_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    RecipeIngredient::delete_many()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .exec(&txn)
        .await?;

    let result = Recipe::delete_by_id(recipe_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(Error::RecipeNotFound { id: recipe_id });
    }

    txn.commit().await?;
    Ok(())
}
