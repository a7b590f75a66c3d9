//! JSON-backed value types shared by several entities.
//!
//! Nutrition records and allergen sets are stored as JSON columns rather than
//! separate tables; they are always read and written together with their owner.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Nutrition values per 100 g (solids) or 100 ml (liquids).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(default)]
pub struct Nutrition {
    /// Energy in kcal
    pub energy_kcal: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbohydrates: f64,
    /// Fat in grams
    pub fat: f64,
    /// Dietary fiber in grams
    pub fiber: f64,
    /// Salt in grams
    pub salt: f64,
}

impl Nutrition {
    /// Multiplies every value by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            energy_kcal: self.energy_kcal * factor,
            protein: self.protein * factor,
            carbohydrates: self.carbohydrates * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
            salt: self.salt * factor,
        }
    }

    /// Component-wise sum of two records.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self {
            energy_kcal: self.energy_kcal + other.energy_kcal,
            protein: self.protein + other.protein,
            carbohydrates: self.carbohydrates + other.carbohydrates,
            fat: self.fat + other.fat,
            fiber: self.fiber + other.fiber,
            salt: self.salt + other.salt,
        }
    }
}

/// Ordered, de-duplicated set of allergen codes (e.g. `"gluten"`, `"milk"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct AllergenSet(pub BTreeSet<String>);

impl AllergenSet {
    /// Builds a set from any list of codes; codes are trimmed and lowercased.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            codes
                .into_iter()
                .map(|code| code.as_ref().trim().to_lowercase())
                .filter(|code| !code.is_empty())
                .collect(),
        )
    }

    /// Returns true if no allergen is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the set holds `code`.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    /// Adds every code of `other` to this set.
    pub fn extend_from(&mut self, other: &Self) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Iterates over the codes in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
