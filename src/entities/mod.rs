//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod neutral_article;
pub mod recipe;
pub mod recipe_ingredient;
pub mod supplier;
pub mod supplier_article;
pub mod values;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use neutral_article::{
    BaseUnit, Column as NeutralArticleColumn, Entity as NeutralArticle,
    Model as NeutralArticleModel,
};
pub use recipe::{Column as RecipeColumn, Entity as Recipe, Model as RecipeModel};
pub use recipe_ingredient::{
    Column as RecipeIngredientColumn, Entity as RecipeIngredient, Model as RecipeIngredientModel,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
pub use supplier_article::{
    ArticleStatus, Availability, Column as SupplierArticleColumn, Entity as SupplierArticle,
    Model as SupplierArticleModel, QualityGrade,
};
pub use values::{AllergenSet, Nutrition};
