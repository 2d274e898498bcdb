//! Persisted domain models.
//!
//! These structs define the JSON shapes stored by the persistence gateway.
//! Field names serialize in camelCase to stay compatible with state written
//! by earlier versions of the store.

pub mod analytics;
pub mod cart;
pub mod contact;
pub mod order;
pub mod product;

pub use analytics::AnalyticsEvent;
pub use cart::CartLine;
pub use contact::ContactMessage;
pub use order::{Order, OrderItem};
pub use product::{Product, ProductInput};
