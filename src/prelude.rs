//! Chango prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    benefits::{Benefit, PaymentAdvice, UserMembership, payment_advice},
    cart::{Cart, CartLine},
    compare::{Comparison, compare_stores},
    filter::{Category, FilterParams, ProductSummary, Trend, TrendStats, filter_products},
    history::PricePoint,
    offers::{offer_discount, offer_threshold},
    outliers::{annotate_outliers, detect_outliers},
    products::{Listing, Product, RawProductRow},
    render::render_comparison,
    sanitize::sanitize_price,
    state::{AppState, SavedCart, StateError, SubscriptionTier, Theme},
    stores::Store,
    totals::{StoreTotals, store_totals},
};
