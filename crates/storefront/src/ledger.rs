//! Order ledger: finalizes carts into permanent orders.
//!
//! Checkout never touches catalog stock - every unit in the cart was
//! already subtracted from availability when it was reserved. The ledger
//! only snapshots the cart into an immutable order, appends it to the
//! persisted history, and clears the cart.

use albarka_core::OrderId;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::cart::CartStore;
use crate::models::{Order, OrderItem};
use crate::storage::{Gateway, KeyValueStore, StorageError};

/// Errors from checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was invoked with zero cart lines.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The order could not be appended to the persisted history. The cart
    /// is left untouched so checkout can be retried.
    #[error("could not save your order")]
    Persistence(#[from] StorageError),
}

/// Append-only order history.
pub struct OrderLedger<'a, S: KeyValueStore> {
    gateway: &'a Gateway<S>,
}

impl<'a, S: KeyValueStore> OrderLedger<'a, S> {
    /// Tie a ledger to its persistence gateway.
    pub const fn new(gateway: &'a Gateway<S>) -> Self {
        Self { gateway }
    }

    /// Finalize the cart into an order.
    ///
    /// Copies the current lines into an immutable [`Order`] (no live
    /// references), totals them, appends the order to the persisted
    /// history, and clears the cart. The cart-clear write is best-effort:
    /// once the order is durable, a failed cart save only costs
    /// durability of the (valid) empty in-memory cart.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`] if the cart has no lines
    /// - [`CheckoutError::Persistence`] if the order write failed; the
    ///   cart is unchanged and checkout can be retried
    pub fn checkout(&self, cart: &mut CartStore) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let date = Utc::now();
        let existing = self.gateway.load_orders();
        let id = next_order_id(date, existing.last().map(|o| o.id));

        let order = Order {
            id,
            items: cart.lines().iter().map(OrderItem::from).collect(),
            total: cart.total(),
            date,
        };

        self.gateway.append_order(&order)?;

        cart.clear();
        if let Err(err) = self.gateway.save_cart(cart.lines()) {
            warn!(error = %err, "failed to persist cleared cart after checkout");
        }

        info!(order_id = %order.id, total = %order.total, "checkout completed");
        Ok(order)
    }

    /// The full order history, oldest first.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.gateway.load_orders()
    }
}

/// Derive a unique order ID from the checkout timestamp.
///
/// IDs are millisecond timestamps; two checkouts in the same millisecond
/// would collide, so the ID is bumped past the last one when needed.
fn next_order_id(date: DateTime<Utc>, last: Option<OrderId>) -> OrderId {
    let candidate = date.timestamp_millis();
    match last {
        Some(last) if last.as_i64() >= candidate => OrderId::new(last.as_i64() + 1),
        _ => OrderId::new(candidate),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{CartLine, Product};
    use crate::storage::MemoryStore;
    use albarka_core::{Price, ProductId};
    use rust_decimal::dec;

    fn product(id: i64, price: rust_decimal::Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: "misc".into(),
            price: Price::new(price),
            quantity: 10,
            picture: None,
            rating: None,
            review_count: None,
        }
    }

    fn two_line_cart() -> CartStore {
        let mut cart = CartStore::default();
        cart.add_units(&product(1, dec!(10.00)), 2);
        cart.add_units(&product(2, dec!(5.50)), 1);
        cart
    }

    #[test]
    fn test_checkout_totals_and_clears_cart() {
        let gateway = Gateway::new(MemoryStore::new());
        let ledger = OrderLedger::new(&gateway);
        let mut cart = two_line_cart();

        let order = ledger.checkout(&mut cart).unwrap();
        assert_eq!(order.total, dec!(25.50));
        assert_eq!(order.items.len(), 2);
        assert!(cart.is_empty());
        assert_eq!(ledger.orders().len(), 1);
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let gateway = Gateway::new(MemoryStore::new());
        let ledger = OrderLedger::new(&gateway);
        let mut cart = CartStore::default();
        assert!(matches!(
            ledger.checkout(&mut cart),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_checkout_failure_keeps_cart() {
        let gateway = Gateway::new(MemoryStore::new());
        let ledger = OrderLedger::new(&gateway);
        let mut cart = two_line_cart();

        gateway.store().set_fail_writes(true);
        assert!(matches!(
            ledger.checkout(&mut cart),
            Err(CheckoutError::Persistence(_))
        ));
        assert_eq!(cart.lines().len(), 2);
        assert!(ledger.orders().is_empty());
    }

    #[test]
    fn test_order_snapshot_is_detached_from_cart() {
        let gateway = Gateway::new(MemoryStore::new());
        let ledger = OrderLedger::new(&gateway);
        let mut cart = two_line_cart();

        let order = ledger.checkout(&mut cart).unwrap();
        cart.add_units(&product(3, dec!(99.00)), 1);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total, dec!(25.50));
    }

    #[test]
    fn test_order_ids_are_unique_within_a_millisecond() {
        let date = Utc::now();
        let first = next_order_id(date, None);
        let second = next_order_id(date, Some(first));
        assert!(second > first);
    }
}
