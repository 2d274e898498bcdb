//! Inventory reconciler: moves stock between the catalog and the cart as a
//! single logical operation.
//!
//! Reservation-direction operations follow one protocol:
//!
//! 1. snapshot the product's stock and the line's current quantity
//! 2. apply the change optimistically in memory
//! 3. persist catalog and cart (two sequential writes; either failing is
//!    overall failure)
//! 4. on failure, restore both snapshots, re-save best-effort, and report
//!    [`ReconcileError::PersistenceFailed`]
//!
//! Release-direction operations (returning stock) skip the rollback:
//! returning units can never violate the conservation invariant, so a
//! failed persist only costs durability and the in-memory state stays
//! authoritative for the rest of the session.

use albarka_core::ProductId;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cart::CartStore;
use crate::catalog::CatalogStore;
use crate::models::CartLine;
use crate::storage::{Gateway, KeyValueStore, StorageError};

/// Errors from reserve / change-quantity operations.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The requested quantity was zero (or a zero delta). Rejected before
    /// any state change.
    #[error("requested quantity must be at least 1")]
    InvalidQuantity,

    /// The product is out of stock, has fewer units than requested, or no
    /// longer exists (a deleted product is treated as zero stock).
    #[error("not enough stock for product {product_id}")]
    OutOfStock {
        /// The product that could not satisfy the request.
        product_id: ProductId,
    },

    /// Persisting the optimistic change failed; the in-memory state was
    /// rolled back to the pre-call snapshot.
    #[error("could not save your cart; the change was rolled back")]
    PersistenceFailed(#[source] StorageError),
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    /// The line still exists with its new quantity.
    Updated(CartLine),
    /// The change dropped the quantity to zero and the line was removed.
    Removed,
}

/// Executes stock movement against injected catalog and cart stores.
///
/// Construct one per operation; it borrows the stores mutably for exactly
/// as long as the operation runs.
pub struct Reconciler<'a, S: KeyValueStore> {
    catalog: &'a mut CatalogStore,
    cart: &'a mut CartStore,
    gateway: &'a Gateway<S>,
}

impl<'a, S: KeyValueStore> Reconciler<'a, S> {
    /// Tie a reconciler to the stores it mutates and the gateway it
    /// persists through.
    pub const fn new(
        catalog: &'a mut CatalogStore,
        cart: &'a mut CartStore,
        gateway: &'a Gateway<S>,
    ) -> Self {
        Self {
            catalog,
            cart,
            gateway,
        }
    }

    /// Reserve `quantity` units of a product into the cart.
    ///
    /// On success both the catalog decrement and the cart line are durable
    /// and the new line state is returned.
    ///
    /// # Errors
    ///
    /// - [`ReconcileError::InvalidQuantity`] for a zero quantity (no state
    ///   change)
    /// - [`ReconcileError::OutOfStock`] if the product is missing or has
    ///   fewer than `quantity` units available (no state change)
    /// - [`ReconcileError::PersistenceFailed`] if a write failed (state
    ///   rolled back)
    pub fn reserve(
        &mut self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLine, ReconcileError> {
        if quantity == 0 {
            return Err(ReconcileError::InvalidQuantity);
        }

        let product = self
            .catalog
            .get(product_id)
            .filter(|p| p.quantity >= quantity)
            .cloned()
            .ok_or(ReconcileError::OutOfStock { product_id })?;

        // snapshot for rollback
        let prev_stock = product.quantity;
        let prev_cart_qty = self.cart.find(product_id).map_or(0, |l| l.cart_quantity);

        // apply optimistically
        self.catalog.decrease_stock(product_id, quantity);
        let line = self.cart.add_units(&product, quantity).clone();

        if let Err(err) = self.persist_both() {
            self.rollback(product_id, prev_stock, prev_cart_qty);
            return Err(ReconcileError::PersistenceFailed(err));
        }

        debug!(%product_id, quantity, "reserved stock into cart");
        Ok(line)
    }

    /// Change a line's quantity by `delta`.
    ///
    /// A positive delta reserves more units and follows the same protocol
    /// as [`Self::reserve`]. A negative delta returns units to stock and
    /// always succeeds; if the resulting quantity would drop to zero or
    /// below, the operation degrades to a full [`Self::release`].
    ///
    /// A delta for a product with no cart line is a no-op and reports the
    /// line as removed.
    ///
    /// # Errors
    ///
    /// Same as [`Self::reserve`], for positive deltas only.
    pub fn change_quantity(
        &mut self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<QuantityChange, ReconcileError> {
        if delta == 0 {
            return Err(ReconcileError::InvalidQuantity);
        }

        let Some(line) = self.cart.find(product_id) else {
            return Ok(QuantityChange::Removed);
        };
        let new_quantity = i64::from(line.cart_quantity) + delta;

        if new_quantity <= 0 {
            self.release(product_id);
            return Ok(QuantityChange::Removed);
        }

        if delta > 0 {
            let added = u32::try_from(delta).map_err(|_| ReconcileError::InvalidQuantity)?;
            let line = self.reserve(product_id, added)?;
            return Ok(QuantityChange::Updated(line));
        }

        // release direction: always succeeds in memory, persist best-effort
        let returned = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        let new_quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);

        self.catalog.increase_stock(product_id, returned);
        self.cart.set_quantity(product_id, new_quantity);
        self.persist_best_effort();

        self.cart
            .find(product_id)
            .cloned()
            .map_or(Ok(QuantityChange::Removed), |line| {
                Ok(QuantityChange::Updated(line))
            })
    }

    /// Remove a line entirely, returning its full quantity to stock.
    ///
    /// Always succeeds in memory. Persistence is best-effort: a failed
    /// write is logged and retried once by the next successful operation's
    /// full-collection overwrite, but the removal is not undone.
    ///
    /// Returns the removed line, or `None` if the product had no line.
    pub fn release(&mut self, product_id: ProductId) -> Option<CartLine> {
        let line = self.cart.remove(product_id)?;
        self.catalog.increase_stock(product_id, line.cart_quantity);
        self.persist_best_effort();
        debug!(%product_id, quantity = line.cart_quantity, "released cart line back to stock");
        Some(line)
    }

    /// Persist catalog then cart; either failing is overall failure.
    fn persist_both(&self) -> Result<(), StorageError> {
        self.gateway.save_catalog(self.catalog.all())?;
        self.gateway.save_cart(self.cart.lines())
    }

    fn persist_best_effort(&self) {
        if let Err(err) = self.persist_both() {
            warn!(error = %err, "persist failed after release; keeping in-memory state");
        }
    }

    /// Restore the pre-operation snapshot, then try to re-save it.
    ///
    /// A failure of the re-save is not rolled back further: it is logged
    /// and the restored in-memory state is treated as authoritative for
    /// the remainder of the session.
    fn rollback(&mut self, product_id: ProductId, prev_stock: u32, prev_cart_qty: u32) {
        self.catalog.set_stock(product_id, prev_stock);
        if prev_cart_qty > 0 {
            self.cart.set_quantity(product_id, prev_cart_qty);
        } else {
            self.cart.remove(product_id);
        }

        if let Err(err) = self.persist_both() {
            warn!(error = %err, "re-save after rollback failed; in-memory state is authoritative");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::storage::MemoryStore;
    use albarka_core::Price;
    use rust_decimal::dec;

    fn product(id: i64, quantity: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: "misc".into(),
            price: Price::new(dec!(10.00)),
            quantity,
            picture: None,
            rating: None,
            review_count: None,
        }
    }

    struct Fixture {
        catalog: CatalogStore,
        cart: CartStore,
        gateway: Gateway<MemoryStore>,
    }

    impl Fixture {
        fn new(products: Vec<Product>) -> Self {
            Self {
                catalog: CatalogStore::new(products),
                cart: CartStore::default(),
                gateway: Gateway::new(MemoryStore::new()),
            }
        }

        fn reconciler(&mut self) -> Reconciler<'_, MemoryStore> {
            Reconciler::new(&mut self.catalog, &mut self.cart, &self.gateway)
        }

        fn stock(&self, id: i64) -> u32 {
            self.catalog.get(ProductId::new(id)).unwrap().quantity
        }

        fn cart_qty(&self, id: i64) -> Option<u32> {
            self.cart.find(ProductId::new(id)).map(|l| l.cart_quantity)
        }
    }

    #[test]
    fn test_reserve_moves_stock_into_cart() {
        let mut fx = Fixture::new(vec![product(1, 5)]);
        let line = fx.reconciler().reserve(ProductId::new(1), 3).unwrap();

        assert_eq!(line.cart_quantity, 3);
        assert_eq!(fx.stock(1), 2);
        // durable too
        assert_eq!(fx.gateway.load_cart().len(), 1);
    }

    #[test]
    fn test_reserve_zero_quantity_rejected() {
        let mut fx = Fixture::new(vec![product(1, 5)]);
        assert!(matches!(
            fx.reconciler().reserve(ProductId::new(1), 0),
            Err(ReconcileError::InvalidQuantity)
        ));
        assert_eq!(fx.stock(1), 5);
    }

    #[test]
    fn test_reserve_out_of_stock_leaves_state_unchanged() {
        let mut fx = Fixture::new(vec![product(2, 0)]);
        assert!(matches!(
            fx.reconciler().reserve(ProductId::new(2), 1),
            Err(ReconcileError::OutOfStock { .. })
        ));
        assert_eq!(fx.stock(2), 0);
        assert!(fx.cart.is_empty());
    }

    #[test]
    fn test_reserve_deleted_product_is_out_of_stock() {
        let mut fx = Fixture::new(vec![]);
        assert!(matches!(
            fx.reconciler().reserve(ProductId::new(7), 1),
            Err(ReconcileError::OutOfStock { .. })
        ));
    }

    #[test]
    fn test_reserve_rolls_back_on_persistence_failure() {
        let mut fx = Fixture::new(vec![product(1, 5)]);
        fx.gateway.store().set_fail_writes(true);

        let result = fx.reconciler().reserve(ProductId::new(1), 2);
        assert!(matches!(result, Err(ReconcileError::PersistenceFailed(_))));

        // exact pre-call state
        assert_eq!(fx.stock(1), 5);
        assert_eq!(fx.cart_qty(1), None);
    }

    #[test]
    fn test_cart_write_failure_rolls_back_the_persisted_catalog() {
        let mut fx = Fixture::new(vec![product(1, 5)]);
        // the catalog write goes through, then the cart write fails
        fx.gateway.store().set_fail_writes_for(crate::storage::keys::CART);

        let result = fx.reconciler().reserve(ProductId::new(1), 2);
        assert!(matches!(result, Err(ReconcileError::PersistenceFailed(_))));

        assert_eq!(fx.stock(1), 5);
        assert_eq!(fx.cart_qty(1), None);
        // the rollback's re-save undid the decremented catalog on disk too
        let stored = fx.gateway.load_catalog().unwrap();
        assert_eq!(stored.first().map(|p| p.quantity), Some(5));
    }

    #[test]
    fn test_rollback_restores_existing_line_quantity() {
        let mut fx = Fixture::new(vec![product(1, 5)]);
        fx.reconciler().reserve(ProductId::new(1), 2).unwrap();

        fx.gateway.store().set_fail_writes(true);
        let result = fx.reconciler().reserve(ProductId::new(1), 1);
        assert!(matches!(result, Err(ReconcileError::PersistenceFailed(_))));

        assert_eq!(fx.stock(1), 3);
        assert_eq!(fx.cart_qty(1), Some(2));
    }

    #[test]
    fn test_reserve_change_release_round_trip() {
        let mut fx = Fixture::new(vec![product(1, 5)]);

        fx.reconciler().reserve(ProductId::new(1), 3).unwrap();
        assert_eq!(fx.stock(1), 2);
        assert_eq!(fx.cart_qty(1), Some(3));

        let change = fx.reconciler().change_quantity(ProductId::new(1), -1).unwrap();
        assert!(matches!(change, QuantityChange::Updated(ref l) if l.cart_quantity == 2));
        assert_eq!(fx.stock(1), 3);

        let released = fx.reconciler().release(ProductId::new(1)).unwrap();
        assert_eq!(released.cart_quantity, 2);
        assert_eq!(fx.stock(1), 5);
        assert_eq!(fx.cart_qty(1), None);
    }

    #[test]
    fn test_change_quantity_to_zero_degrades_to_release() {
        let mut fx = Fixture::new(vec![product(1, 5)]);
        fx.reconciler().reserve(ProductId::new(1), 2).unwrap();

        let change = fx.reconciler().change_quantity(ProductId::new(1), -2).unwrap();
        assert_eq!(change, QuantityChange::Removed);
        assert_eq!(fx.stock(1), 5);
        assert!(fx.cart.is_empty());
    }

    #[test]
    fn test_change_quantity_positive_respects_stock() {
        let mut fx = Fixture::new(vec![product(1, 3)]);
        fx.reconciler().reserve(ProductId::new(1), 3).unwrap();

        assert!(matches!(
            fx.reconciler().change_quantity(ProductId::new(1), 1),
            Err(ReconcileError::OutOfStock { .. })
        ));
        assert_eq!(fx.cart_qty(1), Some(3));
    }

    #[test]
    fn test_release_orphaned_line_drops_units() {
        let mut fx = Fixture::new(vec![product(1, 5)]);
        fx.reconciler().reserve(ProductId::new(1), 2).unwrap();
        fx.catalog.delete(ProductId::new(1));

        // releasing an orphaned line removes it; the units have nowhere to go
        let released = fx.reconciler().release(ProductId::new(1)).unwrap();
        assert_eq!(released.cart_quantity, 2);
        assert!(fx.cart.is_empty());
        assert!(fx.catalog.all().is_empty());
    }

    #[test]
    fn test_release_survives_persistence_failure() {
        let mut fx = Fixture::new(vec![product(1, 5)]);
        fx.reconciler().reserve(ProductId::new(1), 2).unwrap();

        fx.gateway.store().set_fail_writes(true);
        // best-effort: in-memory removal is not undone
        assert!(fx.reconciler().release(ProductId::new(1)).is_some());
        assert_eq!(fx.stock(1), 5);
        assert!(fx.cart.is_empty());
    }

    #[test]
    fn test_conservation_across_operation_sequence() {
        let mut fx = Fixture::new(vec![product(1, 10)]);

        fx.reconciler().reserve(ProductId::new(1), 4).unwrap();
        fx.reconciler().change_quantity(ProductId::new(1), 2).unwrap();
        fx.reconciler().change_quantity(ProductId::new(1), -3).unwrap();
        fx.reconciler().reserve(ProductId::new(1), 1).unwrap();

        let reserved = fx.cart_qty(1).unwrap_or(0);
        assert_eq!(fx.stock(1) + reserved, 10);
    }
}
