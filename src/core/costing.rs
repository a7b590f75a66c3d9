//! Recipe costing - turns a recipe's ingredient list into a cost summary.
//!
//! Every ingredient is resolved against a [`Catalog`] snapshot and contributes
//! `price_per_unit * quantity` to the total, including unresolved ingredients
//! which contribute zero. The recipe confidence starts at high and only ever gets
//! worse: a neutral fallback lowers it to medium, an unresolved ingredient to none.
//! Costing is partial by design; a missing article produces a warning, not an error.

use crate::{
    core::{
        CURRENCY,
        catalog::{Catalog, CatalogScope},
        recipe::{
            IngredientInput, get_ingredients_for_recipe, get_recipe_by_id,
            validate_ingredient_input,
        },
        resolver::{Confidence, Resolution, ResolutionKind, resolve},
        units::{costing_quantity, quantity_in_base_units, unit_dimension},
    },
    entities::{AllergenSet, Nutrition, recipe, recipe_ingredient},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{debug, warn};

/// Cost contribution of one ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientCost {
    /// Persisted ingredient id
    pub ingredient_id: i64,
    /// Display position
    pub sort_order: i32,
    /// Which resolution outcome backs this line
    pub kind: ResolutionKind,
    /// Id of the resolved article
    pub article_id: Option<i64>,
    /// Name of the resolved article
    pub article_name: Option<String>,
    /// Quantity from the recipe
    pub quantity: f64,
    /// Unit of the quantity
    pub unit: String,
    /// Quantity converted to the base unit the price refers to
    pub base_quantity: f64,
    /// Price per base unit used for this line
    pub price_per_unit: f64,
    /// `price_per_unit * base_quantity`, zero if the unit does not convert
    pub line_cost: f64,
    /// Confidence of this line alone
    pub confidence: Confidence,
    /// Whether the ingredient is optional in the recipe
    pub is_optional: bool,
    /// Fallback warning or resolution error
    pub message: Option<String>,
}

/// Aggregate cost of one recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCostSummary {
    /// Recipe the summary belongs to
    pub recipe_id: i64,
    /// Name of the recipe
    pub recipe_name: String,
    /// Portions the recipe yields
    pub portions: i32,
    /// Sum of all line costs
    pub total_cost: f64,
    /// `total_cost / portions`
    pub cost_per_portion: f64,
    /// Worst confidence seen across ingredients
    pub confidence: Confidence,
    /// Fallback warnings and resolution errors, in ingredient order
    pub warnings: Vec<String>,
    /// Always "EUR"
    pub currency: String,
    /// Per-ingredient breakdown, in ingredient order
    pub ingredients: Vec<IngredientCost>,
    /// Union of allergens of all resolved articles
    pub allergens: AllergenSet,
    /// Union of allergen traces of all resolved supplier articles
    pub allergen_traces: AllergenSet,
    /// Nutrition of the whole recipe, from ingredients measured by mass or volume
    pub nutrition_total: Option<Nutrition>,
    /// `nutrition_total` divided by the portions
    pub nutrition_per_portion: Option<Nutrition>,
}

/// Costs a recipe against a catalog snapshot.
///
/// Ingredients are processed in sort order regardless of the order they are
/// passed in.
///
/// # Errors
/// Returns [`Error::NoPortions`] if the recipe's portion count is not positive.
pub fn calculate_cost(
    recipe: &recipe::Model,
    ingredients: &[recipe_ingredient::Model],
    catalog: &Catalog,
) -> Result<RecipeCostSummary> {
    if recipe.portions <= 0 {
        return Err(Error::NoPortions {
            recipe_id: recipe.id,
        });
    }

    let mut ordered: Vec<&recipe_ingredient::Model> = ingredients.iter().collect();
    ordered.sort_by_key(|ingredient| ingredient.sort_order);

    let mut total_cost = 0.0;
    let mut confidence = Confidence::High;
    let mut warnings = Vec::new();
    let mut lines = Vec::with_capacity(ordered.len());
    let mut allergens = AllergenSet::default();
    let mut allergen_traces = AllergenSet::default();
    let mut nutrition_total: Option<Nutrition> = None;

    for ingredient in ordered {
        let resolution = resolve(ingredient.article_ref(), catalog);

        match &resolution {
            Resolution::Unresolved { error } => {
                warn!(recipe_id = recipe.id, ingredient_id = ingredient.id, "{error}");
                warnings.push(format!("ingredient {}: {error}", ingredient.id));
            }
            Resolution::Neutral { article, warning, .. } => {
                warnings.push(format!(
                    "ingredient {} ({}): {warning}",
                    ingredient.id, article.name
                ));
            }
            Resolution::Supplier { .. } => {}
        }

        let base_quantity = costing_quantity(ingredient.quantity, &ingredient.unit);
        let mismatch = unit_mismatch(&resolution, &ingredient.unit).map(|e| e.to_string());
        let (line_cost, line_confidence) = match &mismatch {
            Some(message) => {
                warn!(recipe_id = recipe.id, ingredient_id = ingredient.id, "{message}");
                warnings.push(format!("ingredient {}: {message}", ingredient.id));
                (0.0, Confidence::None)
            }
            None => (
                resolution.price_per_unit() * base_quantity,
                resolution.confidence(),
            ),
        };

        confidence = confidence.worse(line_confidence);
        total_cost += line_cost;

        allergens.extend_from(&resolution.allergens());
        allergen_traces.extend_from(&resolution.allergen_traces());

        if mismatch.is_none()
            && let Some(contribution) =
                nutrition_contribution(&resolution, ingredient.quantity, &ingredient.unit)
        {
            nutrition_total = Some(nutrition_total.map_or(contribution, |sum| sum.plus(contribution)));
        }

        lines.push(IngredientCost {
            ingredient_id: ingredient.id,
            sort_order: ingredient.sort_order,
            kind: resolution.kind(),
            article_id: resolution.article_id(),
            article_name: resolution.article_name().map(str::to_string),
            quantity: ingredient.quantity,
            unit: ingredient.unit.clone(),
            base_quantity,
            price_per_unit: resolution.price_per_unit(),
            line_cost,
            confidence: line_confidence,
            is_optional: ingredient.is_optional,
            message: mismatch.or_else(|| resolution.message().map(str::to_string)),
        });
    }

    let portions = f64::from(recipe.portions);
    debug!(
        recipe_id = recipe.id,
        total_cost,
        confidence = confidence.as_str(),
        "Costed recipe"
    );

    Ok(RecipeCostSummary {
        recipe_id: recipe.id,
        recipe_name: recipe.name.clone(),
        portions: recipe.portions,
        total_cost,
        cost_per_portion: total_cost / portions,
        confidence,
        warnings,
        currency: CURRENCY.to_string(),
        ingredients: lines,
        allergens,
        allergen_traces,
        nutrition_total,
        nutrition_per_portion: nutrition_total.map(|total| total.scaled(1.0 / portions)),
    })
}

/// Reports an ingredient unit whose dimension differs from the resolved
/// article's (e.g. "l" against a price per kg). Unknown units are not checked.
fn unit_mismatch(resolution: &Resolution<'_>, unit: &str) -> Option<Error> {
    let expected = resolution.dimension()?;
    let actual = unit_dimension(unit)?;
    (expected != actual).then(|| Error::IncompatibleUnit {
        unit: unit.trim().to_string(),
        dimension: expected.as_str(),
    })
}

/// Nutrition values are stated per 100 g / 100 ml, i.e. per tenth of a base unit.
fn nutrition_contribution(resolution: &Resolution<'_>, quantity: f64, unit: &str) -> Option<Nutrition> {
    let per_100 = resolution.nutrition()?;
    let base_quantity = quantity_in_base_units(quantity, unit)?;
    Some(per_100.scaled(base_quantity * 10.0))
}

/// Loads a recipe, its ingredients and the matching catalog view, then costs it.
///
/// Returns `Ok(None)` if the recipe does not exist. The catalog is scoped to the
/// recipe's tenant.
///
/// # Errors
/// Returns an error if a database query fails or the recipe has no portions.
pub async fn calculate_recipe_cost(
    db: &DatabaseConnection,
    recipe_id: i64,
) -> Result<Option<RecipeCostSummary>> {
    let Some(recipe) = get_recipe_by_id(db, recipe_id).await? else {
        return Ok(None);
    };

    let ingredients = get_ingredients_for_recipe(db, recipe.id).await?;
    let catalog = Catalog::load_scoped(db, CatalogScope::for_recipe(recipe.tenant_id)).await?;

    calculate_cost(&recipe, &ingredients, &catalog).map(Some)
}

/// Result of checking one not-yet-persisted ingredient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientCheck {
    /// Position in the submitted list
    pub index: usize,
    /// True if the input is well-formed and resolves to an article
    pub valid: bool,
    /// Which resolution outcome the references produce
    pub kind: ResolutionKind,
    /// Confidence of the resolution
    pub confidence: Confidence,
    /// Name of the resolved article
    pub article_name: Option<String>,
    /// Price per base unit
    pub price_per_unit: f64,
    /// `price_per_unit` times the quantity in base units, zero for invalid input
    pub estimated_cost: f64,
    /// Validation error, fallback warning or resolution error
    pub message: Option<String>,
}

/// Outcome of [`validate_ingredients`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientValidation {
    /// True if every ingredient is valid
    pub all_valid: bool,
    /// One check per submitted ingredient, in input order
    pub results: Vec<IngredientCheck>,
    /// Sum of the estimated costs
    pub total_estimated_cost: f64,
}

/// Checks an ingredient list before a recipe is persisted.
///
/// Nothing is written; the caller gets per-ingredient feedback and an estimated
/// total. Ingredients resolving to a neutral article are valid (with a warning);
/// unresolved ingredients and malformed input are not.
#[must_use]
pub fn validate_ingredients(inputs: &[IngredientInput], catalog: &Catalog) -> IngredientValidation {
    let results: Vec<IngredientCheck> = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let resolution = resolve(input.article_ref(), catalog);
            let input_check = validate_ingredient_input(input).and_then(|()| {
                unit_mismatch(&resolution, &input.unit).map_or(Ok(()), Err)
            });
            let estimated_cost = if input_check.is_ok() {
                resolution.price_per_unit() * costing_quantity(input.quantity, &input.unit)
            } else {
                0.0
            };

            let message = match &input_check {
                Err(error) => Some(error.to_string()),
                Ok(()) => resolution.message().map(str::to_string),
            };

            IngredientCheck {
                index,
                valid: input_check.is_ok() && resolution.kind() != ResolutionKind::Error,
                kind: resolution.kind(),
                confidence: resolution.confidence(),
                article_name: resolution.article_name().map(str::to_string),
                price_per_unit: resolution.price_per_unit(),
                estimated_cost,
                message,
            }
        })
        .collect();

    IngredientValidation {
        all_valid: results.iter().all(|check| check.valid),
        total_estimated_cost: results.iter().map(|check| check.estimated_cost).sum(),
        results,
    }
}
