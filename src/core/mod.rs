//! Core business logic - framework-agnostic catalog, recipe and costing operations.
//!
//! Persistence-facing modules (`category`, `supplier`, `neutral_article`,
//! `supplier_article`, `recipe`) validate input and talk to the database. The
//! costing pipeline (`units`, `resolver`, `costing`, `comparison`, `scoring`)
//! works on an in-memory [`catalog::Catalog`] snapshot and never touches the
//! database itself.

/// Currency of every price in the system
pub const CURRENCY: &str = "EUR";

/// In-memory catalog snapshot used by resolution and costing
pub mod catalog;
/// Category CRUD
pub mod category;
/// Ranking of supplier offers behind a neutral article
pub mod comparison;
/// Recipe cost calculation and pre-save ingredient validation
pub mod costing;
/// Neutral (supplier-independent) article CRUD
pub mod neutral_article;
/// Recipe and ingredient persistence
pub mod recipe;
/// Plain-text rendering of cost summaries and comparisons
pub mod report;
/// Ingredient-to-article resolution with confidence tracking
pub mod resolver;
/// Quality and sustainability scores
pub mod scoring;
/// Supplier CRUD
pub mod supplier;
/// Supplier article onboarding and lifecycle
pub mod supplier_article;
/// Packaging unit parsing and base-unit normalization
pub mod units;
