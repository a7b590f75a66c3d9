/// Database connection and table creation
pub mod database;

/// Catalog seed loading from catalog.toml
pub mod catalog;

/// Application settings from environment variables
pub mod settings;
