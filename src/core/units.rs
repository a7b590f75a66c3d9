//! Packaging unit normalization.
//!
//! Supplier packaging units are free text ("25kg Sack", "500g Dose", "1,5l Flasche").
//! This module extracts the first number/unit pair and converts it to a quantity
//! in base units (kg or l), so a package price can be turned into a price per
//! kilogram or liter. Parsing is best effort: a string without a recognizable
//! pair counts as one base unit.
//!
//! Multi-pack strings are not decomposed. In "12x400ml Karton" only "400ml" is
//! read, the "12x" multiplier is ignored.

use crate::entities::BaseUnit;
use regex::Regex;
use std::sync::LazyLock;

// Longer tokens first so "kg" and "ml" win over "g" and "l" at the same position.
#[allow(clippy::expect_used)]
static PACKAGE_UNIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(kg|ml|g|l)\b")
        .expect("Packaging unit pattern should be valid")
});

/// Unit token recognized inside a packaging string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageUnit {
    /// Kilogram, already a base unit
    Kilogram,
    /// Gram, 1/1000 kg
    Gram,
    /// Liter, already a base unit
    Liter,
    /// Milliliter, 1/1000 l
    Milliliter,
}

impl PackageUnit {
    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "kg" => Some(Self::Kilogram),
            "g" => Some(Self::Gram),
            "l" => Some(Self::Liter),
            "ml" => Some(Self::Milliliter),
            _ => None,
        }
    }

    /// Whether this unit measures mass or volume.
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Kilogram | Self::Gram => Dimension::Mass,
            Self::Liter | Self::Milliliter => Dimension::Volume,
        }
    }

    /// How many of this unit make up one base unit.
    #[must_use]
    pub const fn per_base_unit(self) -> f64 {
        match self {
            Self::Kilogram | Self::Liter => 1.0,
            Self::Gram | Self::Milliliter => 1000.0,
        }
    }
}

/// What a unit measures. Quantities only convert within one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// kg, g
    Mass,
    /// l, ml
    Volume,
    /// Pieces, portions, packs
    Count,
}

impl Dimension {
    /// Lowercase label for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::Volume => "volume",
            Self::Count => "count",
        }
    }
}

impl From<BaseUnit> for Dimension {
    fn from(unit: BaseUnit) -> Self {
        match unit {
            BaseUnit::Kilogram => Self::Mass,
            BaseUnit::Liter => Self::Volume,
            BaseUnit::Piece => Self::Count,
        }
    }
}

/// Parses the first number/unit pair of a packaging string.
///
/// Returns `None` when the string holds no recognizable pair or the amount is
/// not a positive number.
#[must_use]
pub fn parse_package(unit: &str) -> Option<(f64, PackageUnit)> {
    let captures = PACKAGE_UNIT_REGEX.captures(unit)?;
    let amount: f64 = captures.get(1)?.as_str().replace(',', ".").parse().ok()?;
    let package_unit = PackageUnit::parse(captures.get(2)?.as_str())?;

    (amount.is_finite() && amount > 0.0).then_some((amount, package_unit))
}

/// Converts a packaging string into its content in base units (kg or l).
///
/// Falls back to `1.0` when nothing can be parsed, so the package price is used
/// as-is. A zero amount ("0g") is treated the same way to keep the result usable
/// as a divisor.
#[must_use]
pub fn normalize_package_quantity(unit: &str) -> f64 {
    parse_package(unit).map_or(1.0, |(amount, package_unit)| {
        amount / package_unit.per_base_unit()
    })
}

/// Price per base unit for a package `price` sold in `unit`.
#[must_use]
pub fn price_per_base_unit(price: f64, unit: &str) -> f64 {
    price / normalize_package_quantity(unit)
}

/// Converts an ingredient quantity expressed in a plain unit symbol ("kg", "g",
/// "l", "ml") into base units. Counted units such as "piece" yield `None`.
#[must_use]
pub fn quantity_in_base_units(quantity: f64, unit: &str) -> Option<f64> {
    PackageUnit::parse(unit.trim()).map(|package_unit| quantity / package_unit.per_base_unit())
}

/// Dimension of a plain ingredient unit symbol; `None` for unknown symbols.
#[must_use]
pub fn unit_dimension(unit: &str) -> Option<Dimension> {
    let unit = unit.trim();
    if let Some(package_unit) = PackageUnit::parse(unit) {
        return Some(package_unit.dimension());
    }
    match unit.to_lowercase().as_str() {
        "piece" | "pieces" | "pcs" | "stk" | "stück" => Some(Dimension::Count),
        _ => None,
    }
}

/// Dimension of a packaging string, read from its first number/unit pair.
#[must_use]
pub fn package_dimension(unit: &str) -> Option<Dimension> {
    parse_package(unit).map(|(_, package_unit)| package_unit.dimension())
}

/// Quantity in the base unit prices refer to. Mass and volume units are
/// converted to kg or l; counted and unknown units are taken as they are.
#[must_use]
pub fn costing_quantity(quantity: f64, unit: &str) -> f64 {
    quantity_in_base_units(quantity, unit).unwrap_or(quantity)
}
