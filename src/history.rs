//! Price history
//!
//! Scrapes are snapshotted per day, keyed by product name and date string
//! (`YYYY-MM-DD`, so lexicographic order is chronological). The history feeds
//! two things: the historical minimum shown next to the current best price,
//! and the short-term trend derived in the filter layer.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One day's cheapest observed price for a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricePoint {
    /// Product name, the join key against the live catalog.
    #[serde(rename = "nombre")]
    pub product_name: String,

    /// Snapshot date, `YYYY-MM-DD`.
    #[serde(rename = "fecha")]
    pub date: String,

    /// Minimum across stores that day.
    #[serde(rename = "precio_minimo")]
    pub min_price: Decimal,
}

/// The lowest positive price ever recorded for `product_name`.
///
/// Returns `None` when the history has no positive price for the product.
#[must_use]
pub fn historical_min(history: &[PricePoint], product_name: &str) -> Option<Decimal> {
    history
        .iter()
        .filter(|point| point.product_name == product_name)
        .filter(|point| point.min_price > Decimal::ZERO)
        .map(|point| point.min_price)
        .min()
}

/// The earliest positive snapshot for `product_name`.
///
/// The trend display compares today's price against the oldest point in the
/// retained window, so "up" means "up since the start of the window".
#[must_use]
pub fn baseline(history: &[PricePoint], product_name: &str) -> Option<Decimal> {
    history
        .iter()
        .filter(|point| point.product_name == product_name)
        .filter(|point| point.min_price > Decimal::ZERO)
        .min_by(|a, b| a.date.cmp(&b.date))
        .map(|point| point.min_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(name: &str, date: &str, min_price: Decimal) -> PricePoint {
        PricePoint {
            product_name: name.into(),
            date: date.into(),
            min_price,
        }
    }

    #[test]
    fn historical_min_is_the_lowest_positive_price() {
        let history = vec![
            point("Leche entera 1L", "2026-08-01", Decimal::new(1450, 0)),
            point("Leche entera 1L", "2026-08-15", Decimal::new(1320, 0)),
            point("Leche entera 1L", "2026-08-20", Decimal::new(1500, 0)),
            point("Pan lactal", "2026-08-15", Decimal::new(900, 0)),
        ];

        assert_eq!(
            historical_min(&history, "Leche entera 1L"),
            Some(Decimal::new(1320, 0))
        );
    }

    #[test]
    fn zero_priced_snapshots_are_ignored() {
        let history = vec![
            point("Leche entera 1L", "2026-08-01", Decimal::ZERO),
            point("Leche entera 1L", "2026-08-15", Decimal::new(1320, 0)),
        ];

        assert_eq!(
            historical_min(&history, "Leche entera 1L"),
            Some(Decimal::new(1320, 0))
        );
    }

    #[test]
    fn unknown_product_has_no_minimum() {
        assert_eq!(historical_min(&[], "Yerba 500g"), None);
    }

    #[test]
    fn baseline_is_the_earliest_dated_point() {
        let history = vec![
            point("Pan lactal", "2026-08-20", Decimal::new(950, 0)),
            point("Pan lactal", "2026-08-01", Decimal::new(900, 0)),
            point("Pan lactal", "2026-08-15", Decimal::new(920, 0)),
        ];

        assert_eq!(
            baseline(&history, "Pan lactal"),
            Some(Decimal::new(900, 0))
        );
    }

    #[test]
    fn baseline_skips_zero_priced_points() {
        let history = vec![
            point("Pan lactal", "2026-08-01", Decimal::ZERO),
            point("Pan lactal", "2026-08-15", Decimal::new(920, 0)),
        ];

        assert_eq!(
            baseline(&history, "Pan lactal"),
            Some(Decimal::new(920, 0))
        );
    }
}
