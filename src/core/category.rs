//! Category business logic - Groups for neutral articles.

use crate::{
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a new category.
///
/// # Errors
/// Returns an error if the name is empty or the insert fails.
pub async fn create_category<C>(
    db: &C,
    name: String,
    description: Option<String>,
) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name cannot be empty".to_string(),
        });
    }

    category::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a category by its unique ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all categories ordered alphabetically by name.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}
