//! Product filter pipeline
//!
//! Decides which products are worth listing at all, then narrows the list by
//! category, free-text search, and price trend. A product with fewer than two
//! usable store prices has nothing to compare, so it is dropped from list
//! views entirely.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::history::{self, PricePoint};
use crate::products::Product;

/// Browsing categories, matched by keyword containment on the normalized
/// category string. `Varios` is the catch-all for anything the other sets
/// miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Meat, poultry, pork and fish.
    Carnes,
    /// Produce and fruit.
    Verdu,
    /// Beverages.
    Bebidas,
    /// Everything else.
    Varios,
}

impl Category {
    const MEAT: [&'static str; 4] = ["carne", "pollo", "cerdo", "pescado"];
    const PRODUCE: [&'static str; 3] = ["verdu", "fruta", "hortaliza"];
    const BEVERAGES: [&'static str; 4] = ["bebida", "gaseosa", "cerveza", "vino"];

    /// Classify a raw category string from the catalog.
    #[must_use]
    pub fn classify(raw: &str) -> Category {
        let normalized = raw.trim().to_lowercase();

        let matches = |keywords: &[&str]| keywords.iter().any(|k| normalized.contains(k));

        if matches(&Self::MEAT) {
            Category::Carnes
        } else if matches(&Self::PRODUCE) {
            Category::Verdu
        } else if matches(&Self::BEVERAGES) {
            Category::Bebidas
        } else {
            Category::Varios
        }
    }
}

/// Direction of the price trend against the historical baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// More than 0.1% above the baseline.
    Up,
    /// More than 0.1% below the baseline.
    Down,
    /// Within the deadband, or no usable baseline.
    Flat,
}

/// Trend of today's minimum price against the historical baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendStats {
    /// Classified direction.
    pub trend: Trend,

    /// Absolute relative change, in percent, rounded to one decimal.
    pub change_pct: Decimal,
}

impl TrendStats {
    const FLAT: TrendStats = TrendStats {
        trend: Trend::Flat,
        change_pct: Decimal::ZERO,
    };
}

/// Changes smaller than this (0.1%) are treated as flat.
fn deadband_pct() -> Decimal {
    Decimal::new(1, 1)
}

/// Compare today's minimum price against the product's historical baseline.
///
/// Products with no usable price or no positive baseline report a flat trend
/// with zero magnitude.
#[must_use]
pub fn trend_stats(product: &Product, price_history: &[PricePoint]) -> TrendStats {
    let Some(min) = product.min_price() else {
        return TrendStats::FLAT;
    };
    let Some(baseline) = history::baseline(price_history, &product.name) else {
        return TrendStats::FLAT;
    };

    let change_pct = (min - baseline) / baseline * Decimal::ONE_HUNDRED;
    let trend = if change_pct > deadband_pct() {
        Trend::Up
    } else if change_pct < -deadband_pct() {
        Trend::Down
    } else {
        Trend::Flat
    };

    TrendStats {
        trend,
        change_pct: change_pct.abs().round_dp(1),
    }
}

/// How many stores carry a usable price for this product.
#[must_use]
pub fn valid_price_count(product: &Product) -> usize {
    product.usable_stores().count()
}

/// Whether the product belongs in comparison list views at all.
///
/// Hidden products are excluded, and so is anything with fewer than two
/// usable store prices; a lone price has nothing to compare against.
#[must_use]
pub fn is_comparable(product: &Product) -> bool {
    product.visible && valid_price_count(product) >= 2
}

/// List-view filters. All fields are optional and compose as AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    /// Keep only products classified into this category.
    pub category: Option<Category>,

    /// Case-insensitive substring match on name or ticker.
    pub search: Option<String>,

    /// Keep only products trending this way.
    pub trend: Option<Trend>,
}

/// A product decorated with the derived figures list views render.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary<'a> {
    pub product: &'a Product,
    pub min_price: Option<Decimal>,
    pub avg_price: Option<Decimal>,
    pub stats: TrendStats,
}

/// Run the full pipeline: comparability gate, then category, search, and
/// trend filters, preserving catalog order.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    price_history: &[PricePoint],
    params: &FilterParams,
) -> Vec<ProductSummary<'a>> {
    products
        .iter()
        .filter(|p| is_comparable(p))
        .filter(|p| matches_category(p, params.category))
        .filter(|p| matches_search(p, params.search.as_deref()))
        .map(|p| decorate(p, price_history))
        .filter(|summary| matches_trend(summary, params.trend))
        .collect()
}

/// Attach the derived figures a list row renders.
#[must_use]
pub fn decorate<'a>(product: &'a Product, price_history: &[PricePoint]) -> ProductSummary<'a> {
    ProductSummary {
        product,
        min_price: product.min_price(),
        avg_price: product.avg_price(),
        stats: trend_stats(product, price_history),
    }
}

fn matches_category(product: &Product, wanted: Option<Category>) -> bool {
    wanted.is_none_or(|category| Category::classify(&product.category) == category)
}

fn matches_search(product: &Product, term: Option<&str>) -> bool {
    let Some(term) = term else {
        return true;
    };
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    product.name.to_lowercase().contains(&term)
        || product
            .ticker
            .as_deref()
            .is_some_and(|ticker| ticker.to_lowercase().contains(&term))
}

fn matches_trend(summary: &ProductSummary<'_>, wanted: Option<Trend>) -> bool {
    wanted.is_none_or(|trend| summary.stats.trend == trend)
}
