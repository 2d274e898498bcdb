//! Cart line model.

use albarka_core::{Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// One line in the cart: a product reference plus a reserved quantity.
///
/// Every unit counted by `cart_quantity` was subtracted from the referenced
/// product's available stock at the moment it was reserved; the reconciler
/// keeps the two complementary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Units reserved into this line. Always at least 1; a line that would
    /// drop to 0 is removed instead.
    pub cart_quantity: u32,
}

impl CartLine {
    /// Create a new line reserving `quantity` units of `product`.
    #[must_use]
    pub fn for_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            picture: product.picture.clone(),
            cart_quantity: quantity,
        }
    }

    /// The extended price of this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.line_total(self.cart_quantity)
    }
}
