//! Catalog entry model.

use albarka_core::{Price, ProductId, Rating};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// `quantity` is the *available* stock: units reserved into a cart line have
/// already been subtracted from it. The catalog is the source of truth for
/// inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Price,
    /// Available (unreserved) stock.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
}

impl Product {
    /// Whether any stock is available to reserve.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Admin form data for creating or editing a product.
///
/// `id` is `None` for a new product; the catalog store assigns the next free
/// ID on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Price,
    pub quantity: u32,
    pub picture: Option<String>,
    pub rating: Option<Rating>,
    pub review_count: Option<u32>,
}

impl ProductInput {
    /// Turn the input into a product with the given ID.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
            picture: self.picture,
            rating: self.rating,
            review_count: self.review_count,
        }
    }
}

impl From<Product> for ProductInput {
    fn from(product: Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name,
            description: product.description,
            category: product.category,
            price: product.price,
            quantity: product.quantity,
            picture: product.picture,
            rating: product.rating,
            review_count: product.review_count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_serializes_camel_case() {
        let product = Product {
            id: ProductId::new(1),
            name: "Widget".into(),
            description: "A widget".into(),
            category: "tools".into(),
            price: Price::new(dec!(9.99)),
            quantity: 3,
            picture: None,
            rating: Some(Rating::new(4.5).unwrap()),
            review_count: Some(12),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["reviewCount"], 12);
        assert!(json.get("picture").is_none());
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let json = r#"{
            "id": 2,
            "name": "Plain",
            "description": "No extras",
            "category": "misc",
            "price": "1.00",
            "quantity": 0
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(!product.in_stock());
        assert_eq!(product.rating, None);
    }
}
