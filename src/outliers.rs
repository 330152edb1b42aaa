//! Outlier detection
//!
//! Scraped prices occasionally come in wildly wrong (unit mixups, stale
//! promos, parsing glitches). For each product, the promotional and regular
//! price series are examined separately across stores: a store whose price
//! deviates from the series mean by more than 50% is flagged, and flagged
//! stores are excluded from every comparison downstream.
//!
//! The central value is the **mean**. The upstream codebase also carried a
//! median-based variant on a dead path; only the mean rule is deployed here
//! so a single system cannot disagree with itself.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::{products::Product, stores::Store};

/// Relative deviation from the series mean above which a price is an outlier.
fn deviation_threshold() -> Decimal {
    // 50%
    Decimal::new(5, 1)
}

/// One price series across stores (promotional or regular), positive values
/// only.
type Series = SmallVec<[(Store, Decimal); 8]>;

/// Compute per-store outlier flags for a single product.
///
/// Pure and idempotent: the result depends only on the product's listings,
/// never on previously persisted flags. Every store with a listing gets an
/// entry; a store is flagged when *either* its promotional or its regular
/// price deviates more than 50% from the mean of the corresponding series.
///
/// A series with fewer than two positive prices has no meaningful central
/// value and flags nothing. Zero and negative prices neither contribute to
/// the mean nor get flagged.
#[must_use]
pub fn detect_outliers(product: &Product) -> FxHashMap<Store, bool> {
    let mut promo_series = Series::new();
    let mut regular_series = Series::new();

    for store in Store::ALL {
        let Some(listing) = product.listing(store) else {
            continue;
        };
        if listing.promo_price > Decimal::ZERO {
            promo_series.push((store, listing.promo_price));
        }
        if listing.regular_price > Decimal::ZERO {
            regular_series.push((store, listing.regular_price));
        }
    }

    let mut flags = FxHashMap::default();
    for store in Store::ALL {
        if product.listing(store).is_some() {
            flags.insert(store, false);
        }
    }

    for series in [&promo_series, &regular_series] {
        for store in deviant_stores(series) {
            flags.insert(store, true);
        }
    }

    let flagged = flags.values().filter(|&&f| f).count();
    if flagged > 0 {
        debug!(product_id = product.id, flagged, "flagged outlier prices");
    }

    flags
}

/// Recompute and persist outlier flags for every product in a batch.
///
/// This is what runs after ingestion, before any filtering or comparison.
pub fn annotate_outliers(products: &mut [Product]) {
    for product in products {
        product.outliers = detect_outliers(product);
    }
}

/// Stores in one series whose price deviates beyond the threshold.
fn deviant_stores(series: &Series) -> SmallVec<[Store; 8]> {
    let mut deviants = SmallVec::new();

    if series.len() < 2 {
        return deviants;
    }

    let count = Decimal::from(series.len());
    let sum: Decimal = series.iter().map(|&(_, price)| price).sum();
    let mean = sum / count;

    if mean <= Decimal::ZERO {
        return deviants;
    }

    for &(store, price) in series {
        let deviation = (price - mean).abs() / mean;
        if deviation > deviation_threshold() {
            deviants.push(store);
        }
    }

    deviants
}
