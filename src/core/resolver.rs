//! Article resolution - picks the concrete article that backs a recipe ingredient.
//!
//! Resolution follows a strict priority with no blending of prices:
//! 1. the referenced supplier article, if it is active and available (high confidence);
//! 2. otherwise the referenced neutral article, priced at the lower bound of its
//!    estimated range (medium confidence);
//! 3. otherwise nothing, reported as an unresolved result (no confidence).
//!
//! Resolution never fails. Missing data is expressed through the `Unresolved`
//! variant, which callers fold into their own results.

use crate::{
    core::{
        catalog::Catalog,
        units::{Dimension, package_dimension, price_per_base_unit},
    },
    entities::{AllergenSet, Nutrition, neutral_article, supplier_article},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Warning attached to every neutral-article fallback
pub const NEUTRAL_FALLBACK_WARNING: &str = "no specific supplier article available";
/// Error attached to every unresolved ingredient
pub const UNRESOLVED_ERROR: &str = "no article available: recipe cannot be costed";

/// How directly a cost figure traces back to real supplier pricing.
///
/// Variants are ordered from worst to best, so `min` is the "worse of" combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// No article could be resolved
    None,
    /// Estimated from a neutral article
    Medium,
    /// Exact supplier price
    High,
}

impl Confidence {
    /// Returns the worse of two confidence levels.
    #[must_use]
    pub fn worse(self, other: Self) -> Self {
        self.min(other)
    }

    /// Lowercase label used in reports and serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// The pair of optional article references carried by an ingredient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    /// Preferred concrete article
    pub supplier_article_id: Option<i64>,
    /// Fallback generic article
    pub neutral_article_id: Option<i64>,
}

impl ArticleRef {
    /// Returns true if at least one reference is set.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.supplier_article_id.is_some() || self.neutral_article_id.is_some()
    }
}

/// Which of the three outcomes a resolution produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// Backed by a supplier article
    SupplierArticle,
    /// Backed by a neutral article estimate
    NeutralArticle,
    /// Not backed by anything
    Error,
}

/// Outcome of resolving one ingredient against a catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// An active, available supplier article was found.
    Supplier {
        /// The resolved article
        article: &'a supplier_article::Model,
        /// Package price divided by the normalized package quantity
        price_per_unit: f64,
    },
    /// Fell back to a neutral article estimate.
    Neutral {
        /// The resolved article
        article: &'a neutral_article::Model,
        /// Lower bound of the estimated price range
        price_per_unit: f64,
        /// Why the fallback was used
        warning: String,
    },
    /// Neither reference could be resolved.
    Unresolved {
        /// Human-readable reason
        error: String,
    },
}

impl Resolution<'_> {
    /// Which outcome this is.
    #[must_use]
    pub const fn kind(&self) -> ResolutionKind {
        match self {
            Self::Supplier { .. } => ResolutionKind::SupplierArticle,
            Self::Neutral { .. } => ResolutionKind::NeutralArticle,
            Self::Unresolved { .. } => ResolutionKind::Error,
        }
    }

    /// Confidence implied by the outcome.
    #[must_use]
    pub const fn confidence(&self) -> Confidence {
        match self {
            Self::Supplier { .. } => Confidence::High,
            Self::Neutral { .. } => Confidence::Medium,
            Self::Unresolved { .. } => Confidence::None,
        }
    }

    /// Price per base unit; zero when unresolved.
    #[must_use]
    pub const fn price_per_unit(&self) -> f64 {
        match self {
            Self::Supplier { price_per_unit, .. } | Self::Neutral { price_per_unit, .. } => {
                *price_per_unit
            }
            Self::Unresolved { .. } => 0.0,
        }
    }

    /// Nutrition snapshot of the resolved article.
    #[must_use]
    pub const fn nutrition(&self) -> Option<Nutrition> {
        match self {
            Self::Supplier { article, .. } => article.nutrition,
            Self::Neutral { article, .. } => article.nutrition,
            Self::Unresolved { .. } => None,
        }
    }

    /// Allergens of the resolved article; empty when unresolved.
    #[must_use]
    pub fn allergens(&self) -> AllergenSet {
        match self {
            Self::Supplier { article, .. } => article.allergens.clone(),
            Self::Neutral { article, .. } => article.common_allergens.clone(),
            Self::Unresolved { .. } => AllergenSet::default(),
        }
    }

    /// Possible cross-contamination; only supplier articles declare traces.
    #[must_use]
    pub fn allergen_traces(&self) -> AllergenSet {
        match self {
            Self::Supplier { article, .. } => article.allergen_traces.clone(),
            Self::Neutral { .. } | Self::Unresolved { .. } => AllergenSet::default(),
        }
    }

    /// Id of the resolved article, if any.
    #[must_use]
    pub const fn article_id(&self) -> Option<i64> {
        match self {
            Self::Supplier { article, .. } => Some(article.id),
            Self::Neutral { article, .. } => Some(article.id),
            Self::Unresolved { .. } => None,
        }
    }

    /// Name of the resolved article, if any.
    #[must_use]
    pub fn article_name(&self) -> Option<&str> {
        match self {
            Self::Supplier { article, .. } => Some(&article.name),
            Self::Neutral { article, .. } => Some(&article.name),
            Self::Unresolved { .. } => None,
        }
    }

    /// Dimension of the unit the price refers to; `None` when unresolved or
    /// when a packaging string cannot be read.
    #[must_use]
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Self::Supplier { article, .. } => package_dimension(&article.unit),
            Self::Neutral { article, .. } => Some(article.base_unit.into()),
            Self::Unresolved { .. } => None,
        }
    }

    /// Warning or error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Supplier { .. } => None,
            Self::Neutral { warning, .. } => Some(warning),
            Self::Unresolved { error } => Some(error),
        }
    }
}

/// Resolves an ingredient's article references against the catalog.
#[must_use]
pub fn resolve(reference: ArticleRef, catalog: &Catalog) -> Resolution<'_> {
    if let Some(supplier_article_id) = reference.supplier_article_id {
        match catalog.active_supplier_article(supplier_article_id) {
            Some(article) if article.is_orderable() => {
                return Resolution::Supplier {
                    article,
                    price_per_unit: price_per_base_unit(article.price, &article.unit),
                };
            }
            Some(article) => debug!(
                supplier_article_id,
                availability = ?article.availability,
                "Supplier article is not available, trying neutral fallback"
            ),
            None => debug!(
                supplier_article_id,
                "Supplier article is unknown or not active, trying neutral fallback"
            ),
        }
    }

    if let Some(article) = reference
        .neutral_article_id
        .and_then(|id| catalog.neutral_article(id))
    {
        return Resolution::Neutral {
            article,
            price_per_unit: article.estimated_price_min,
            warning: NEUTRAL_FALLBACK_WARNING.to_string(),
        };
    }

    Resolution::Unresolved {
        error: UNRESOLVED_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{ArticleStatus, Availability};
    use crate::test_utils::{neutral_article_fixture, supplier_article_fixture};

    fn catalog() -> Catalog {
        let mut beef = supplier_article_fixture(1005, 1, 58.50, "5kg Packung");
        beef.neutral_article_id = Some(7);
        beef.allergens = AllergenSet::from_codes(["celery"]);
        beef.allergen_traces = AllergenSet::from_codes(["mustard"]);

        let mut out_of_stock = supplier_article_fixture(1010, 1, 20.0, "1kg Dose");
        out_of_stock.availability = Availability::Unavailable;

        let mut retired = supplier_article_fixture(1011, 1, 20.0, "1kg Dose");
        retired.status = ArticleStatus::Inactive;

        let mut paprika = neutral_article_fixture(7, "Paprika", 18.0, 30.0);
        paprika.common_allergens = AllergenSet::from_codes(["sulphites"]);

        Catalog::default()
            .with_supplier_article(beef)
            .with_supplier_article(out_of_stock)
            .with_supplier_article(retired)
            .with_neutral_article(paprika)
    }

    fn reference(supplier: Option<i64>, neutral: Option<i64>) -> ArticleRef {
        ArticleRef {
            supplier_article_id: supplier,
            neutral_article_id: neutral,
        }
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::None < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert_eq!(Confidence::High.worse(Confidence::Medium), Confidence::Medium);
        assert_eq!(Confidence::None.worse(Confidence::High), Confidence::None);
    }

    #[test]
    fn test_supplier_article_wins_over_neutral() {
        let catalog = catalog();
        let resolution = resolve(reference(Some(1005), Some(7)), &catalog);

        assert_eq!(resolution.kind(), ResolutionKind::SupplierArticle);
        assert_eq!(resolution.confidence(), Confidence::High);
        assert!((resolution.price_per_unit() - 11.70).abs() < 1e-9);
        assert_eq!(resolution.article_id(), Some(1005));
        assert!(resolution.allergens().contains("celery"));
        assert!(resolution.allergen_traces().contains("mustard"));
        assert!(resolution.message().is_none());
    }

    #[test]
    fn test_neutral_fallback_without_supplier_reference() {
        let catalog = catalog();
        let resolution = resolve(reference(None, Some(7)), &catalog);

        assert_eq!(resolution.kind(), ResolutionKind::NeutralArticle);
        assert_eq!(resolution.confidence(), Confidence::Medium);
        assert_eq!(resolution.price_per_unit(), 18.0);
        assert_eq!(resolution.message(), Some(NEUTRAL_FALLBACK_WARNING));
        assert!(resolution.allergens().contains("sulphites"));
        assert!(resolution.allergen_traces().is_empty());
    }

    #[test]
    fn test_neutral_fallback_for_unavailable_or_inactive_supplier_article() {
        let catalog = catalog();
        for supplier_article_id in [1010, 1011, 9999] {
            let resolution = resolve(reference(Some(supplier_article_id), Some(7)), &catalog);
            assert_eq!(resolution.kind(), ResolutionKind::NeutralArticle);
            assert_eq!(resolution.confidence(), Confidence::Medium);
            assert!(!resolution.message().unwrap().is_empty());
        }
    }

    #[test]
    fn test_unresolved_when_nothing_matches() {
        let catalog = catalog();
        for article_ref in [
            reference(None, None),
            reference(Some(1010), None),
            reference(Some(9999), Some(9999)),
        ] {
            let resolution = resolve(article_ref, &catalog);
            assert_eq!(resolution.kind(), ResolutionKind::Error);
            assert_eq!(resolution.confidence(), Confidence::None);
            assert_eq!(resolution.price_per_unit(), 0.0);
            assert!(resolution.nutrition().is_none());
            assert!(resolution.allergens().is_empty());
            assert_eq!(resolution.message(), Some(UNRESOLVED_ERROR));
        }
    }

    #[test]
    fn test_article_ref_presence() {
        assert!(!ArticleRef::default().is_present());
        assert!(reference(None, Some(1)).is_present());
        assert!(reference(Some(1), None).is_present());
    }
}
