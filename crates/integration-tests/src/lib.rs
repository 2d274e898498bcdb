//! Integration test harness for Albarka Store.
//!
//! Every test drives the public [`Storefront`] facade over a real
//! [`FileStore`] in a temp directory, the same path the CLI takes. The
//! harness keeps the temp directory alive so a test can drop one
//! storefront and reopen another over the same files to prove durability.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p albarka-integration-tests
//! ```

#![allow(clippy::expect_used)]

use std::path::Path;

use tempfile::TempDir;

use albarka_core::{Price, ProductId};
use albarka_storefront::config::StorefrontConfig;
use albarka_storefront::models::{Product, ProductInput};
use albarka_storefront::storage::FileStore;
use albarka_storefront::Storefront;

/// A disposable data directory plus the knobs to open storefronts over it.
pub struct TestStore {
    dir: TempDir,
    config: StorefrontConfig,
}

impl TestStore {
    /// A fresh data directory with seeding disabled, so tests start from
    /// an empty catalog and add exactly what they need.
    #[must_use]
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = StorefrontConfig {
            data_dir: dir.path().to_path_buf(),
            seed_on_empty: false,
            ..StorefrontConfig::default()
        };
        Self { dir, config }
    }

    /// A fresh data directory that seeds the demo catalog on first open.
    #[must_use]
    pub fn seeded() -> Self {
        let mut store = Self::empty();
        store.config.seed_on_empty = true;
        store
    }

    /// Open a storefront session over this directory. Call again after
    /// dropping the previous session to simulate an app restart.
    #[must_use]
    pub fn open(&self) -> Storefront<FileStore> {
        let file_store = FileStore::open(self.dir.path()).expect("open file store");
        Storefront::open(file_store, self.config.clone())
    }

    /// The raw store, for poking at persisted bytes directly.
    #[must_use]
    pub fn raw(&self) -> FileStore {
        FileStore::open(self.dir.path()).expect("open file store")
    }

    /// The data directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Shorthand product builder for test catalogs.
#[must_use]
pub fn product(id: i64, name: &str, price: &str, quantity: u32) -> ProductInput {
    ProductInput {
        id: Some(ProductId::new(id)),
        name: name.to_string(),
        description: String::new(),
        category: "test".to_string(),
        price: price.parse::<Price>().expect("valid price literal"),
        quantity,
        picture: None,
        rating: None,
        review_count: None,
    }
}

/// Stock a storefront with products and return it.
pub fn stocked(store: &TestStore, products: &[(i64, &str, &str, u32)]) -> Storefront<FileStore> {
    let mut storefront = store.open();
    for &(id, name, price, quantity) in products {
        storefront
            .upsert_product(product(id, name, price, quantity))
            .expect("stock test product");
    }
    storefront
}

/// The stock currently recorded for a product.
#[must_use]
pub fn stock_of(storefront: &Storefront<FileStore>, id: i64) -> u32 {
    storefront
        .catalog()
        .get(ProductId::new(id))
        .map(|p: &Product| p.quantity)
        .expect("product exists")
}
