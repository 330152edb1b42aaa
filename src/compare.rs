//! Cart comparison
//!
//! Ranks the stores that can fulfil a whole cart and picks the cheapest.
//! A store missing even one line is dropped entirely, however cheap the
//! rest of its prices are; when no store survives, that is surfaced as an
//! explicit state rather than a misleading zero-cost ranking.

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    cart::Cart,
    products::Product,
    stores::Store,
    totals::{StoreTotals, store_totals},
};

/// Outcome of comparing a cart across all stores.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// At least one store can fulfil the whole cart.
    Ranked {
        /// Viable stores, cheapest first. Ties keep [`Store::ALL`] order.
        results: Vec<StoreTotals>,

        /// Best-vs-worst spread: the most expensive viable total minus the
        /// cheapest. Zero when only one store is viable (no comparison to
        /// show).
        savings: Decimal,
    },

    /// No single store can fulfil every line; the cart is incomplete
    /// everywhere. A valid terminal state, not an error.
    Incomplete,
}

impl Comparison {
    /// The cheapest viable store's totals, if any store is viable.
    #[must_use]
    pub fn best(&self) -> Option<&StoreTotals> {
        match self {
            Comparison::Ranked { results, .. } => results.first(),
            Comparison::Incomplete => None,
        }
    }

    /// All viable stores, cheapest first.
    #[must_use]
    pub fn results(&self) -> &[StoreTotals] {
        match self {
            Comparison::Ranked { results, .. } => results,
            Comparison::Incomplete => &[],
        }
    }
}

/// Price a cart at every store and rank the viable ones.
#[must_use]
pub fn compare_stores(cart: &Cart, products: &[Product]) -> Comparison {
    let mut results: Vec<StoreTotals> = Store::ALL
        .into_iter()
        .map(|store| store_totals(cart, products, store))
        .filter(|totals| totals.viable)
        .collect();

    if results.is_empty() {
        debug!(lines = cart.len(), "no store can fulfil the cart");
        return Comparison::Incomplete;
    }

    // Stable sort: equal totals keep Store::ALL order, so the winner on a
    // tie is deterministic.
    results.sort_by(|a, b| a.total.cmp(&b.total));

    let savings = match (results.first(), results.last()) {
        (Some(best), Some(worst)) if results.len() >= 2 => worst.total - best.total,
        _ => Decimal::ZERO,
    };

    if let Some(best) = results.first() {
        debug!(
            best = %best.store,
            total = %best.total,
            viable = results.len(),
            %savings,
            "ranked cart across stores"
        );
    }

    Comparison::Ranked { results, savings }
}
