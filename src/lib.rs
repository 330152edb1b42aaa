//! Chango
//!
//! Chango is a grocery price-comparison engine: it sanitizes scraped supermarket prices, flags outlier quotes, parses shelf promotions, and ranks stores by total cart cost.

pub mod benefits;
pub mod cart;
pub mod compare;
pub mod filter;
pub mod history;
pub mod offers;
pub mod outliers;
pub mod prelude;
pub mod products;
pub mod render;
pub mod sanitize;
pub mod state;
pub mod stores;
pub mod totals;
