//! Typed persistence gateway over a [`KeyValueStore`].
//!
//! Every write is a full-collection overwrite; there are no partial updates
//! and no transactions spanning keys. Callers that need two collections
//! persisted together (the reconciler) issue two sequential writes and
//! treat either failing as overall failure.
//!
//! # Corrupt state policy
//!
//! Stored JSON that fails to parse is treated as corrupt and replaced with
//! an empty collection, with a warning logged. It is never surfaced as a
//! hard failure: the application must stay interactive regardless of what
//! is on disk. The analytics event log goes further and is never validated
//! at all.

use albarka_core::Theme;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::{KeyValueStore, StorageError, keys};
use crate::models::{AnalyticsEvent, CartLine, ContactMessage, Order, Product};

/// Typed reads and writes for every persisted collection.
#[derive(Debug)]
pub struct Gateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Gateway<S> {
    /// Wrap a key-value store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Persist the full catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is rejected.
    pub fn save_catalog(&self, products: &[Product]) -> Result<(), StorageError> {
        self.save_collection(keys::CATALOG, products)
    }

    /// Load the catalog.
    ///
    /// `None` means nothing usable is stored (first run, or corrupt
    /// content) and the caller may seed. An empty-but-valid catalog loads
    /// as `Some(vec![])` so an admin who deleted every product is not
    /// re-seeded.
    #[must_use]
    pub fn load_catalog(&self) -> Option<Vec<Product>> {
        self.load_collection(keys::CATALOG)
    }

    /// Persist the full cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is rejected.
    pub fn save_cart(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        self.save_collection(keys::CART, lines)
    }

    /// Load the cart. Missing or corrupt content loads as empty.
    #[must_use]
    pub fn load_cart(&self) -> Vec<CartLine> {
        self.load_collection(keys::CART).unwrap_or_default()
    }

    /// Append one order to the persisted history.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is rejected.
    pub fn append_order(&self, order: &Order) -> Result<(), StorageError> {
        let mut orders = self.load_orders();
        orders.push(order.clone());
        self.save_collection(keys::ORDERS, &orders)
    }

    /// Load the order history in insertion (chronological) order.
    #[must_use]
    pub fn load_orders(&self) -> Vec<Order> {
        self.load_collection(keys::ORDERS).unwrap_or_default()
    }

    /// Append one analytics event.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is rejected. Callers treat
    /// this as advisory; the tracker only logs it.
    pub fn append_event(&self, event: &AnalyticsEvent) -> Result<(), StorageError> {
        let mut events = self.load_events();
        events.push(event.clone());
        self.save_collection(keys::ANALYTICS_EVENTS, &events)
    }

    /// Load the analytics event log. Never validated: missing or corrupt
    /// content loads as empty without so much as a warning.
    #[must_use]
    pub fn load_events(&self) -> Vec<AnalyticsEvent> {
        self.store
            .get(keys::ANALYTICS_EVENTS)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Append one contact form submission.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is rejected.
    pub fn append_contact_message(&self, message: &ContactMessage) -> Result<(), StorageError> {
        let mut messages: Vec<ContactMessage> =
            self.load_collection(keys::CONTACT_MESSAGES).unwrap_or_default();
        messages.push(message.clone());
        self.save_collection(keys::CONTACT_MESSAGES, &messages)
    }

    /// Persist the theme preference.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write is rejected.
    pub fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.store.set(keys::THEME, theme.as_str())
    }

    /// Load the theme preference, defaulting to light.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        self.store
            .get(keys::THEME)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items).map_err(|err| StorageError::Serialize {
            key: key.to_owned(),
            reason: err.to_string(),
        })?;
        self.store.set(key, &json)
    }

    /// Load a JSON collection, recovering from corrupt content.
    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let raw = match self.store.get(key) {
            Ok(value) => value?,
            Err(err) => {
                warn!(key, error = %err, "storage read failed; treating as empty");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Some(items),
            Err(err) => {
                warn!(key, error = %err, "stored content is corrupt; discarding");
                None
            }
        }
    }
}
