//! Report formatting.
//!
//! Turns cost summaries and comparison rows into plain text for the command line.
//! All functions are pure and work on the structured results of
//! [`crate::core::costing`] and [`crate::core::comparison`].

use crate::core::{
    CURRENCY, comparison::ComparisonRow, costing::RecipeCostSummary, resolver::Confidence,
};

/// Formats an amount with two decimals and the currency code. Cents are
/// rounded half away from zero, so 0.125 becomes "0.13 EUR".
///
/// # Returns
/// Formatted string like "585.00 EUR"
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    format!("{rounded:.2} {CURRENCY}")
}

/// Human readable label for a confidence level.
#[must_use]
pub const fn confidence_label(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "high (supplier prices)",
        Confidence::Medium => "medium (partly estimated)",
        Confidence::None => "none (incomplete)",
    }
}

/// Renders a multi-line cost summary: header, one line per ingredient, totals,
/// allergens and warnings.
#[must_use]
pub fn format_cost_summary(summary: &RecipeCostSummary) -> String {
    let mut out = format!("{} ({} portions)\n", summary.recipe_name, summary.portions);

    for line in &summary.ingredients {
        let name = line.article_name.as_deref().unwrap_or("?");
        let optional = if line.is_optional { " (optional)" } else { "" };
        out.push_str(&format!(
            "  {:>8.3} {:<6} {name}{optional}: {}\n",
            line.quantity,
            line.unit,
            format_currency(line.line_cost)
        ));
    }

    out.push_str(&format!("  Total:       {}\n", format_currency(summary.total_cost)));
    out.push_str(&format!(
        "  Per portion: {}\n",
        format_currency(summary.cost_per_portion)
    ));
    out.push_str(&format!(
        "  Confidence:  {}\n",
        confidence_label(summary.confidence)
    ));

    if !summary.allergens.is_empty() {
        let codes: Vec<&str> = summary.allergens.iter().collect();
        out.push_str(&format!("  Allergens:   {}\n", codes.join(", ")));
    }
    if !summary.allergen_traces.is_empty() {
        let codes: Vec<&str> = summary.allergen_traces.iter().collect();
        out.push_str(&format!("  Traces:      {}\n", codes.join(", ")));
    }

    for warning in &summary.warnings {
        out.push_str(&format!("  ! {warning}\n"));
    }

    out
}

fn comparison_line(
    supplier: &str,
    article: &str,
    price: &str,
    per_base_unit: &str,
    quality: &str,
    sustainability: &str,
) -> String {
    format!(
        "  {supplier:<20} {article:<12} {price:>14} {per_base_unit:>14} {quality:>4} {sustainability:>4}\n"
    )
}

/// Renders comparison rows as an aligned table, cheapest first.
#[must_use]
pub fn format_comparison_table(rows: &[ComparisonRow]) -> String {
    if rows.is_empty() {
        return "  no active supplier articles\n".to_string();
    }

    let mut out = comparison_line("Supplier", "Article", "Price", "Per base unit", "Q", "S");
    for row in rows {
        out.push_str(&comparison_line(
            row.supplier_name.as_deref().unwrap_or("?"),
            &row.article_number,
            &format_currency(row.price),
            &format_currency(row.price_per_base_unit),
            &row.quality_score.to_string(),
            &row.sustainability_score.to_string(),
        ));
    }
    out
}
