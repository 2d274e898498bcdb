//! Sales report aggregation over real order and event history.
//!
//! Run with: cargo test -p albarka-integration-tests

#![allow(clippy::expect_used, clippy::unwrap_used)]

use albarka_core::ProductId;
use albarka_integration_tests::{stocked, TestStore};
use albarka_storefront::report::DateRange;
use albarka_storefront::storage::FileStore;
use albarka_storefront::Storefront;
use chrono::{Duration, Utc};
use rust_decimal::dec;

fn place_order(storefront: &mut Storefront<FileStore>, id: i64, quantity: u32) {
    storefront.reserve(ProductId::new(id), quantity).unwrap();
    storefront.checkout().unwrap();
}

#[test]
fn test_report_aggregates_revenue_and_units() {
    let store = TestStore::empty();
    let mut storefront = stocked(&store, &[(1, "Lamp", "10.00", 10), (2, "Mug", "5.50", 10)]);

    place_order(&mut storefront, 1, 2); // 20.00
    place_order(&mut storefront, 2, 3); // 16.50

    let report = storefront.sales_report(&DateRange::all());
    assert_eq!(report.revenue, dec!(36.50));
    assert_eq!(report.order_count, 2);
    assert_eq!(report.items_sold, 5);

    // both orders landed today
    assert_eq!(report.daily_sales.len(), 1);
    let (_, today_revenue) = report.daily_sales.iter().next().unwrap();
    assert_eq!(*today_revenue, dec!(36.50));
}

#[test]
fn test_top_products_rank_by_units_sold() {
    let store = TestStore::empty();
    let mut storefront = stocked(
        &store,
        &[
            (1, "Lamp", "10.00", 10),
            (2, "Mug", "5.50", 10),
            (3, "Rug", "80.00", 10),
        ],
    );

    place_order(&mut storefront, 2, 5);
    place_order(&mut storefront, 1, 3);
    place_order(&mut storefront, 3, 1);

    let report = storefront.sales_report(&DateRange::all());
    let names: Vec<&str> = report
        .top_products
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, vec!["Mug", "Lamp", "Rug"]);
}

#[test]
fn test_date_range_excludes_out_of_range_orders() {
    let store = TestStore::empty();
    let mut storefront = stocked(&store, &[(1, "Lamp", "10.00", 10)]);
    place_order(&mut storefront, 1, 1);

    let future_only = DateRange {
        from: Some(Utc::now() + Duration::days(1)),
        to: None,
    };
    let report = storefront.sales_report(&future_only);
    assert_eq!(report.order_count, 0);
    assert_eq!(report.revenue, dec!(0));
    assert!(report.top_products.is_empty());
}

#[test]
fn test_low_stock_uses_the_configured_threshold() {
    let store = TestStore::empty();
    // default threshold is 5
    let storefront = stocked(&store, &[(1, "Lamp", "10.00", 4), (2, "Mug", "5.50", 9)]);

    let low: Vec<&str> = storefront
        .low_stock()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(low, vec!["Lamp"]);
}
