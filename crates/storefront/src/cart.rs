//! Cart store: an ordered collection of cart lines.
//!
//! Deliberately dumb. The cart never touches catalog stock - that coupling
//! lives in the reconciler - and never persists itself. It just manages the
//! line collection and computes totals.

use albarka_core::ProductId;
use rust_decimal::Decimal;

use crate::models::{CartLine, Product};

/// Live cart state for the current session.
#[derive(Debug, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create a store over an initial line list (loaded from storage).
    #[must_use]
    pub const fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn find(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Add `quantity` units of `product`, creating a line on first add or
    /// incrementing the existing one. Returns the resulting line.
    pub fn add_units(&mut self, product: &Product, quantity: u32) -> &CartLine {
        let idx = self.lines.iter().position(|l| l.product_id == product.id);
        match idx {
            Some(idx) => {
                // indexing is guarded by the position() above
                #[allow(clippy::indexing_slicing)]
                let line = &mut self.lines[idx];
                line.cart_quantity += quantity;
                line
            }
            None => {
                self.lines.push(CartLine::for_product(product, quantity));
                // just pushed, cannot be empty
                #[allow(clippy::indexing_slicing)]
                &self.lines[self.lines.len() - 1]
            }
        }
    }

    /// Set a line's quantity directly (rollback and release paths).
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.cart_quantity = quantity;
        }
    }

    /// Remove a line entirely, returning it if it existed.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| l.product_id == product_id)?;
        Some(self.lines.remove(idx))
    }

    /// Drop every line (successful checkout).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Cart total: sum of line totals, rounded to 2 decimal places.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .sum::<Decimal>()
            .round_dp(2)
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|l| l.cart_quantity).sum()
    }
}
