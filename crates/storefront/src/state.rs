//! The storefront facade: every user intent enters the state layer here.
//!
//! [`Storefront`] owns the catalog store, the cart store, and the
//! persistence gateway, and routes intents through the reconciler and the
//! order ledger. It is the single place the presentation layer talks to;
//! it hands back snapshots and [`Notification`]s and never calls back into
//! the caller.

use albarka_core::{Email, ProductId, Theme};
use serde_json::json;
use tracing::warn;

use crate::analytics::{AnalyticsTracker, CHECKOUT_COMPLETED, CHECKOUT_OPENED};
use crate::cart::CartStore;
use crate::catalog::{CatalogFilter, CatalogStore, TrustSignals};
use crate::config::StorefrontConfig;
use crate::error::{Result, StoreError};
use crate::ledger::OrderLedger;
use crate::models::{CartLine, ContactMessage, Order, Product, ProductInput};
use crate::reconciler::{QuantityChange, Reconciler};
use crate::report::{DateRange, SalesReport};
use crate::seed;
use crate::storage::{Gateway, KeyValueStore};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// A transient, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    /// A success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// An informational notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

impl From<&StoreError> for Notification {
    fn from(err: &StoreError) -> Self {
        Self::error(err.to_string())
    }
}

/// Summary returned when the checkout flow opens.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPreview {
    pub line_count: usize,
    pub total: rust_decimal::Decimal,
}

/// The storefront state container.
pub struct Storefront<S: KeyValueStore> {
    config: StorefrontConfig,
    gateway: Gateway<S>,
    catalog: CatalogStore,
    cart: CartStore,
    theme: Theme,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open a storefront over a key-value store, loading persisted state.
    ///
    /// A first run (or a corrupt catalog) starts from the seed catalog
    /// when `config.seed_on_empty` is set, and persists it best-effort so
    /// the next session loads it back.
    pub fn open(store: S, config: StorefrontConfig) -> Self {
        let gateway = Gateway::new(store);

        let catalog = gateway.load_catalog().unwrap_or_else(|| {
            if config.seed_on_empty {
                let products = seed::products();
                if let Err(err) = gateway.save_catalog(&products) {
                    warn!(error = %err, "could not persist seed catalog");
                }
                products
            } else {
                Vec::new()
            }
        });

        let cart = CartStore::new(gateway.load_cart());
        let theme = gateway.load_theme();

        Self {
            config,
            gateway,
            catalog: CatalogStore::new(catalog),
            cart,
            theme,
        }
    }

    /// The catalog snapshot.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The cart snapshot.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The persistence gateway.
    #[must_use]
    pub const fn gateway(&self) -> &Gateway<S> {
        &self.gateway
    }

    /// The active theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    // ========================================================================
    // Cart intents
    // ========================================================================

    /// Reserve `quantity` units of a product into the cart.
    ///
    /// # Errors
    ///
    /// See [`crate::reconciler::ReconcileError`]; failures leave state as
    /// it was before the call.
    pub fn reserve(&mut self, product_id: ProductId, quantity: u32) -> Result<CartLine> {
        let line = Reconciler::new(&mut self.catalog, &mut self.cart, &self.gateway)
            .reserve(product_id, quantity)?;
        Ok(line)
    }

    /// Change a cart line's quantity by `delta` (positive reserves more,
    /// negative releases).
    ///
    /// # Errors
    ///
    /// See [`crate::reconciler::ReconcileError`]; only positive deltas can
    /// fail.
    pub fn change_quantity(&mut self, product_id: ProductId, delta: i64) -> Result<QuantityChange> {
        let change = Reconciler::new(&mut self.catalog, &mut self.cart, &self.gateway)
            .change_quantity(product_id, delta)?;
        Ok(change)
    }

    /// Remove a cart line entirely, returning its units to stock.
    pub fn release(&mut self, product_id: ProductId) -> Option<CartLine> {
        Reconciler::new(&mut self.catalog, &mut self.cart, &self.gateway).release(product_id)
    }

    // ========================================================================
    // Checkout
    // ========================================================================

    /// Record that the checkout flow was opened and summarize the cart.
    pub fn open_checkout(&self) -> CheckoutPreview {
        let preview = CheckoutPreview {
            line_count: self.cart.lines().len(),
            total: self.cart.total(),
        };
        self.tracker().track(
            CHECKOUT_OPENED,
            json!({
                "cartItems": preview.line_count,
                "cartTotal": preview.total,
            }),
        );
        preview
    }

    /// Finalize the cart into an order.
    ///
    /// # Errors
    ///
    /// See [`crate::ledger::CheckoutError`]; on failure the cart is left
    /// untouched so checkout can be retried.
    pub fn checkout(&mut self) -> Result<Order> {
        let item_details: Vec<_> = self
            .cart
            .lines()
            .iter()
            .map(|line| {
                json!({
                    "id": line.product_id,
                    "name": line.name,
                    "quantity": line.cart_quantity,
                    "price": line.price,
                })
            })
            .collect();

        let order = OrderLedger::new(&self.gateway).checkout(&mut self.cart)?;

        self.tracker().track(
            CHECKOUT_COMPLETED,
            json!({
                "total": order.total,
                "items": order.items.len(),
                "itemDetails": item_details,
            }),
        );
        Ok(order)
    }

    /// The full order history, oldest first.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        OrderLedger::new(&self.gateway).orders()
    }

    // ========================================================================
    // Admin intents
    // ========================================================================

    /// Create or edit a product.
    ///
    /// The in-memory catalog is updated first; if persisting it fails the
    /// change is kept in memory (authoritative for the session) and the
    /// error is returned for display.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the catalog write failed.
    pub fn upsert_product(&mut self, input: ProductInput) -> Result<Product> {
        let product = self.catalog.upsert(input);
        self.gateway.save_catalog(self.catalog.all())?;
        Ok(product)
    }

    /// Delete a product unconditionally. Cart lines referencing it become
    /// orphaned and reconcile as zero-stock from now on.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the catalog write failed.
    pub fn delete_product(&mut self, product_id: ProductId) -> Result<bool> {
        let removed = self.catalog.delete(product_id);
        if removed {
            self.gateway.save_catalog(self.catalog.all())?;
        }
        Ok(removed)
    }

    /// Products passing `filter`, computed on demand.
    #[must_use]
    pub fn filtered_catalog(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.catalog.filter(filter)
    }

    /// Products at or below the configured low-stock threshold.
    #[must_use]
    pub fn low_stock(&self) -> Vec<&Product> {
        self.catalog.low_stock(self.config.low_stock_threshold)
    }

    /// Catalog-wide rating summary.
    #[must_use]
    pub fn trust_signals(&self) -> TrustSignals {
        self.catalog.trust_signals()
    }

    /// Aggregate the admin report for `range`.
    #[must_use]
    pub fn sales_report(&self, range: &DateRange) -> SalesReport {
        SalesReport::build(&self.orders(), &self.gateway.load_events(), range)
    }

    // ========================================================================
    // Misc intents
    // ========================================================================

    /// Flip the theme and persist the preference best-effort.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(err) = self.gateway.save_theme(self.theme) {
            warn!(error = %err, "could not persist theme preference");
        }
        self.theme
    }

    /// Record a contact form submission.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the write failed.
    pub fn submit_contact(
        &self,
        name: impl Into<String>,
        email: Email,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<()> {
        let submission = ContactMessage::now(name, email, subject, message);
        self.gateway.append_contact_message(&submission)?;
        Ok(())
    }

    /// Record a free-form analytics event.
    pub fn track(&self, name: &str, data: serde_json::Value) {
        self.tracker().track(name, data);
    }

    const fn tracker(&self) -> AnalyticsTracker<'_, S> {
        AnalyticsTracker::new(&self.gateway)
    }
}
