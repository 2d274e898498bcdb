//! Catalog store: the source of truth for products and available stock.
//!
//! Pure in-memory collection management. Nothing here persists anything -
//! every mutating call must be followed by a gateway write, and that is the
//! caller's responsibility (the facade for admin edits, the reconciler for
//! stock movement).

use albarka_core::ProductId;

use crate::models::{Product, ProductInput};

/// Live catalog state.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

/// Search / category criteria for catalog projection.
///
/// Filtering is a stateless projection computed on demand; filtered results
/// are never stored, so they can never go stale.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring matched against name and description.
    pub query: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
}

impl CatalogFilter {
    /// Whether a product passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let matches_query = self.query.as_ref().is_none_or(|q| {
            let q = q.to_lowercase();
            product.name.to_lowercase().contains(&q)
                || product.description.to_lowercase().contains(&q)
        });
        let matches_category = self
            .category
            .as_ref()
            .is_none_or(|c| &product.category == c);
        matches_query && matches_category
    }
}

/// Catalog-wide rating summary shown as storefront trust signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrustSignals {
    /// Mean rating across all products (unrated products count as 0).
    pub average_rating: f32,
    /// Total review count across all products.
    pub total_reviews: u64,
}

impl CatalogStore {
    /// Create a store over an initial product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Insert or replace a product.
    ///
    /// An input whose `id` matches an existing product replaces it in
    /// place. Anything else (no `id`, or an `id` no longer in the catalog)
    /// inserts a new product under the next free ID.
    pub fn upsert(&mut self, input: ProductInput) -> Product {
        if let Some(id) = input.id
            && let Some(existing) = self.products.iter_mut().find(|p| p.id == id)
        {
            *existing = input.into_product(id);
            return existing.clone();
        }

        let product = input.into_product(self.next_id());
        self.products.push(product.clone());
        product
    }

    /// Remove a product unconditionally.
    ///
    /// Returns whether anything was removed. Cart lines referencing the
    /// product become orphaned; the reconciler treats them as zero-stock
    /// from here on.
    pub fn delete(&mut self, id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    /// Take `qty` units out of available stock.
    ///
    /// Returns `false` without changing anything if the product is missing
    /// or has fewer than `qty` units available.
    pub fn decrease_stock(&mut self, id: ProductId, qty: u32) -> bool {
        match self.products.iter_mut().find(|p| p.id == id) {
            Some(product) if product.quantity >= qty => {
                product.quantity -= qty;
                true
            }
            _ => false,
        }
    }

    /// Return `qty` units to available stock.
    ///
    /// A no-op when the product has been deleted: units released from an
    /// orphaned cart line have nowhere to go.
    pub fn increase_stock(&mut self, id: ProductId, qty: u32) {
        if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
            product.quantity += qty;
        }
    }

    /// Restore a product's stock to a snapshot value (rollback path).
    pub(crate) fn set_stock(&mut self, id: ProductId, qty: u32) {
        if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
            product.quantity = qty;
        }
    }

    /// Products passing `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Products at or below the low-stock threshold.
    #[must_use]
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.quantity <= threshold)
            .collect()
    }

    /// Catalog-wide rating summary.
    #[must_use]
    pub fn trust_signals(&self) -> TrustSignals {
        if self.products.is_empty() {
            return TrustSignals {
                average_rating: 0.0,
                total_reviews: 0,
            };
        }

        let rating_sum: f32 = self
            .products
            .iter()
            .map(|p| p.rating.map_or(0.0, |r| r.value()))
            .sum();
        let total_reviews = self
            .products
            .iter()
            .map(|p| u64::from(p.review_count.unwrap_or(0)))
            .sum();

        #[allow(clippy::cast_precision_loss)]
        TrustSignals {
            average_rating: rating_sum / self.products.len() as f32,
            total_reviews,
        }
    }

    /// The ID the next inserted product will get: one past the highest
    /// existing ID, or 1 for an empty catalog.
    #[must_use]
    pub fn next_id(&self) -> ProductId {
        let max = self.products.iter().map(|p| p.id.as_i64()).max();
        ProductId::new(max.map_or(1, |m| m + 1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use albarka_core::{Price, Rating};
    use rust_decimal::dec;

    fn product(id: i64, name: &str, category: &str, quantity: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.into(),
            description: format!("{name} description"),
            category: category.into(),
            price: Price::new(dec!(10.00)),
            quantity,
            picture: None,
            rating: None,
            review_count: None,
        }
    }

    fn input(name: &str) -> ProductInput {
        ProductInput {
            id: None,
            name: name.into(),
            description: String::new(),
            category: "misc".into(),
            price: Price::new(dec!(1.00)),
            quantity: 1,
            picture: None,
            rating: None,
            review_count: None,
        }
    }

    #[test]
    fn test_insert_assigns_next_id() {
        let mut catalog = CatalogStore::default();
        assert_eq!(catalog.upsert(input("first")).id, ProductId::new(1));

        // a supplied id that matches nothing is ignored on insert
        let stale = catalog.upsert(ProductInput {
            id: Some(ProductId::new(9)),
            ..input("stale-id")
        });
        assert_eq!(stale.id, ProductId::new(2));
        assert_eq!(catalog.upsert(input("third")).id, ProductId::new(3));
    }

    #[test]
    fn test_upsert_replaces_matching_id() {
        let mut catalog = CatalogStore::new(vec![product(1, "Old", "misc", 4)]);
        let updated = catalog.upsert(ProductInput {
            id: Some(ProductId::new(1)),
            ..input("New")
        });
        assert_eq!(updated.name, "New");
        assert_eq!(catalog.all().len(), 1);
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().name, "New");
    }

    #[test]
    fn test_delete_is_unconditional() {
        let mut catalog = CatalogStore::new(vec![product(1, "A", "misc", 0)]);
        assert!(catalog.delete(ProductId::new(1)));
        assert!(!catalog.delete(ProductId::new(1)));
        assert!(catalog.all().is_empty());
    }

    #[test]
    fn test_decrease_stock_guards_bounds() {
        let mut catalog = CatalogStore::new(vec![product(1, "A", "misc", 2)]);
        assert!(!catalog.decrease_stock(ProductId::new(1), 3));
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().quantity, 2);

        assert!(catalog.decrease_stock(ProductId::new(1), 2));
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().quantity, 0);

        assert!(!catalog.decrease_stock(ProductId::new(99), 1));
    }

    #[test]
    fn test_increase_stock_ignores_deleted_product() {
        let mut catalog = CatalogStore::default();
        catalog.increase_stock(ProductId::new(5), 3);
        assert!(catalog.all().is_empty());
    }

    #[test]
    fn test_filter_matches_name_description_and_category() {
        let catalog = CatalogStore::new(vec![
            product(1, "Wireless Mouse", "electronics", 5),
            product(2, "Ceramic Mug", "home", 5),
        ]);

        let by_query = catalog.filter(&CatalogFilter {
            query: Some("MOUSE".into()),
            category: None,
        });
        assert_eq!(by_query.len(), 1);

        let by_category = catalog.filter(&CatalogFilter {
            query: None,
            category: Some("home".into()),
        });
        assert_eq!(by_category.first().map(|p| p.id), Some(ProductId::new(2)));

        let none = catalog.filter(&CatalogFilter {
            query: Some("mug".into()),
            category: Some("electronics".into()),
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_low_stock() {
        let catalog = CatalogStore::new(vec![
            product(1, "A", "misc", 2),
            product(2, "B", "misc", 50),
        ]);
        let low = catalog.low_stock(5);
        assert_eq!(low.len(), 1);
        assert_eq!(low.first().map(|p| p.id), Some(ProductId::new(1)));
    }

    #[test]
    fn test_trust_signals() {
        let mut rated = product(1, "A", "misc", 1);
        rated.rating = Some(Rating::new(4.0).unwrap());
        rated.review_count = Some(10);
        let catalog = CatalogStore::new(vec![rated, product(2, "B", "misc", 1)]);

        let signals = catalog.trust_signals();
        assert!((signals.average_rating - 2.0).abs() < f32::EPSILON);
        assert_eq!(signals.total_reviews, 10);
    }
}
