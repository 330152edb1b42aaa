//! Cart
//!
//! The user's active shopping cart ("chango"): an ordered list of product
//! lines with quantities. Line order is preserved because downstream
//! comparisons are reported in it, and because saved-cart snapshots should
//! restore exactly what the user built.

use serde::{Deserialize, Serialize};

/// One cart line: a product and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product id, as assigned by the data store.
    pub product_id: u64,

    /// Units requested; always at least 1.
    pub quantity: u32,
}

/// The active cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Create a cart from existing lines, dropping non-positive quantities.
    #[must_use]
    pub fn with_lines(lines: impl Into<Vec<CartLine>>) -> Self {
        let mut lines = lines.into();
        lines.retain(|line| line.quantity > 0);
        Cart { lines }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity for a product, zero if absent.
    #[must_use]
    pub fn quantity(&self, product_id: u64) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Add units of a product, merging into an existing line.
    pub fn add(&mut self, product_id: u64, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id,
                quantity,
            });
        }
    }

    /// Set the quantity for a product; zero removes the line.
    pub fn set_quantity(&mut self, product_id: u64, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = quantity;
        } else {
            self.lines.push(CartLine {
                product_id,
                quantity,
            });
        }
    }

    /// Remove a product's line entirely.
    pub fn remove(&mut self, product_id: u64) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
