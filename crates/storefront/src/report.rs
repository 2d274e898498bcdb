//! Admin analytics report.
//!
//! Pure aggregation over the order history and the analytics event log.
//! Nothing here reads storage or mutates state; the facade loads the
//! inputs and hands them over.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::analytics::{CHECKOUT_COMPLETED, CHECKOUT_OPENED};
use crate::models::{AnalyticsEvent, Order};

/// Number of entries in the top-products ranking.
const TOP_PRODUCT_LIMIT: usize = 5;

/// Inclusive date range filter for the report.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// An unbounded range.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Checkout conversion funnel derived from analytics events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionFunnel {
    /// `checkout_opened` events in range.
    pub opened: usize,
    /// `checkout_completed` events in range.
    pub completed: usize,
}

impl ConversionFunnel {
    /// Completed / opened as a percentage; 0 when nothing was opened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn conversion_rate(&self) -> f64 {
        if self.opened == 0 {
            return 0.0;
        }
        self.completed as f64 / self.opened as f64 * 100.0
    }
}

/// The aggregated admin panel numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    /// Total revenue across orders in range.
    pub revenue: Decimal,
    /// Orders in range.
    pub order_count: usize,
    /// Units sold across orders in range.
    pub items_sold: u64,
    /// Revenue per calendar day, in date order.
    pub daily_sales: BTreeMap<NaiveDate, Decimal>,
    /// Up to five best-selling products by units, descending.
    pub top_products: Vec<(String, u64)>,
    /// Checkout funnel from the event log.
    pub funnel: ConversionFunnel,
}

impl SalesReport {
    /// Aggregate orders and events within `range`.
    #[must_use]
    pub fn build(orders: &[Order], events: &[AnalyticsEvent], range: &DateRange) -> Self {
        let in_range: Vec<&Order> = orders.iter().filter(|o| range.contains(o.date)).collect();

        let mut revenue = Decimal::ZERO;
        let mut items_sold = 0_u64;
        let mut daily_sales: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        let mut units_by_product: HashMap<&str, u64> = HashMap::new();

        for order in &in_range {
            revenue += order.total;
            *daily_sales
                .entry(order.date.date_naive())
                .or_insert(Decimal::ZERO) += order.total;
            for item in &order.items {
                items_sold += u64::from(item.cart_quantity);
                *units_by_product.entry(item.name.as_str()).or_insert(0) +=
                    u64::from(item.cart_quantity);
            }
        }

        let mut top_products: Vec<(String, u64)> = units_by_product
            .into_iter()
            .map(|(name, units)| (name.to_owned(), units))
            .collect();
        top_products.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_products.truncate(TOP_PRODUCT_LIMIT);

        let funnel = events
            .iter()
            .filter(|e| range.contains(e.timestamp))
            .fold(ConversionFunnel::default(), |mut funnel, event| {
                match event.name.as_str() {
                    CHECKOUT_OPENED => funnel.opened += 1,
                    CHECKOUT_COMPLETED => funnel.completed += 1,
                    _ => {}
                }
                funnel
            });

        Self {
            revenue,
            order_count: in_range.len(),
            items_sold,
            daily_sales,
            top_products,
            funnel,
        }
    }
}
