//! Completed order models.

use albarka_core::{OrderId, Price, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CartLine;

/// One line of a completed order, copied from the cart at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub cart_quantity: u32,
    pub price: Price,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            cart_quantity: line.cart_quantity,
            price: line.price,
        }
    }
}

/// A completed order.
///
/// Orders are appended to the ledger at checkout and never mutated
/// afterwards. `total` is fixed at checkout time; later price edits do not
/// touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique, time-derived ID (millisecond timestamp at checkout).
    pub id: OrderId,
    pub items: Vec<OrderItem>,
    /// Sum of `price * cart_quantity` over `items`, rounded to 2 places.
    pub total: Decimal,
    pub date: DateTime<Utc>,
}

impl Order {
    /// Total units across all items.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.cart_quantity)).sum()
    }
}
