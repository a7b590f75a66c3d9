//! Unified error type for the catering backend.
//!
//! Resolution outcomes (missing or unavailable articles) are not errors; they are
//! carried as data on [`crate::core::resolver::Resolution`]. The variants here cover
//! input validation, lookups on mutation paths, persistence and configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: f64 },

    #[error("Invalid price range: min {min} is greater than max {max}")]
    InvalidPriceRange { min: f64, max: f64 },

    #[error("Unit {unit:?} is not convertible to the article's {dimension} unit")]
    IncompatibleUnit {
        unit: String,
        dimension: &'static str,
    },

    #[error("Ingredient must reference a supplier article or a neutral article")]
    MissingArticleReference,

    #[error("Recipe not found: {id}")]
    RecipeNotFound { id: i64 },

    #[error("Recipe ingredient not found: {id}")]
    IngredientNotFound { id: i64 },

    #[error("Supplier not found: {id}")]
    SupplierNotFound { id: i64 },

    #[error("Supplier article not found: {id}")]
    SupplierArticleNotFound { id: i64 },

    #[error("Neutral article not found: {id}")]
    NeutralArticleNotFound { id: i64 },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: i64 },

    #[error("Recipe {recipe_id} has no portions defined")]
    NoPortions { recipe_id: i64 },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
