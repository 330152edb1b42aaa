//! Store totals
//!
//! Prices a whole cart at one store: subtotal at list prices, total after
//! shelf promotions, the discount between them, and whether the store can
//! actually fulfil every line. The subtotal deliberately reflects list
//! prices, not discounted ones; it is the "what you'd pay without any promo"
//! baseline the savings figure is measured against.

use rust_decimal::Decimal;

use crate::{cart::Cart, offers::offer_threshold, products::Product, stores::Store};

/// Priced cart at one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreTotals {
    /// The store these figures are for.
    pub store: Store,

    /// Sum of regular prices x quantity, rounded to 2 decimal places.
    pub subtotal: Decimal,

    /// Promotion savings (`subtotal - total`, floored at zero).
    pub discount: Decimal,

    /// What the cart costs here, rounded to 2 decimal places.
    pub total: Decimal,

    /// Whether every cart line has a usable price at this store.
    pub viable: bool,
}

/// Price a cart at a single store.
///
/// Per line, the regular price is `max(promo, regular)` and the promo price
/// `min(promo, regular)`: upstream data occasionally swaps which column
/// holds which value, and this normalization must never be skipped.
///
/// A line with no positive regular price, a missing product, or an unusable
/// listing (placeholder URL, out of stock, outlier) makes the store
/// non-viable for the whole cart; accumulation continues so the figures
/// remain reportable.
#[must_use]
pub fn store_totals(cart: &Cart, products: &[Product], store: Store) -> StoreTotals {
    let mut subtotal = Decimal::ZERO;
    let mut total = Decimal::ZERO;
    // An empty cart is never viable: there is nothing to fulfil.
    let mut viable = !cart.is_empty();

    for line in cart.lines() {
        let Some(product) = products.iter().find(|p| p.id == line.product_id) else {
            viable = false;
            continue;
        };
        let Some(listing) = product.listing(store) else {
            viable = false;
            continue;
        };

        let regular = listing.promo_price.max(listing.regular_price);
        let promo = listing.promo_price.min(listing.regular_price);

        if regular <= Decimal::ZERO {
            viable = false;
            continue;
        }
        if !listing.is_usable(product.is_outlier(store)) {
            viable = false;
        }

        let quantity = Decimal::from(line.quantity);
        subtotal += regular * quantity;

        total += line_total(line.quantity, promo, regular, product.shelf_offer(store));
    }

    let subtotal = subtotal.round_dp(2);
    let total = total.round_dp(2);
    let discount = (subtotal - total).max(Decimal::ZERO);

    StoreTotals {
        store,
        subtotal,
        discount,
        total,
        viable,
    }
}

/// Cost of one line after the shelf promotion, if any.
///
/// With a quantity threshold T and a genuine promo price, every unit inside
/// a complete group of T is charged the promotional unit price and the
/// remainder is charged the regular price. This is the deployed rule: "3x2"
/// at promo 100 / regular 150 prices 4 units as `3*100 + 1*150`, not as
/// literal buy-three-pay-two.
fn line_total(quantity: u32, promo: Decimal, regular: Decimal, offer: Option<&str>) -> Decimal {
    let threshold = offer.and_then(offer_threshold).unwrap_or(0);

    let promo_applies = promo > Decimal::ZERO && promo < regular;

    if threshold > 0 && promo_applies {
        let units_in_promo = (quantity / threshold) * threshold;
        let remainder = quantity % threshold;

        promo * Decimal::from(units_in_promo) + regular * Decimal::from(remainder)
    } else {
        let unit = if promo_applies { promo } else { regular };
        unit * Decimal::from(quantity)
    }
}
