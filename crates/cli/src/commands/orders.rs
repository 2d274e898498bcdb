//! Order history command.

use albarka_storefront::storage::FileStore;
use albarka_storefront::Storefront;

pub fn run(storefront: &Storefront<FileStore>) -> Result<(), Box<dyn std::error::Error>> {
    let orders = storefront.orders();
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    // newest first, like any receipts list
    for order in orders.iter().rev() {
        println!(
            "Order {}  {}  ${:.2}",
            order.id,
            order.date.format("%Y-%m-%d %H:%M"),
            order.total
        );
        for item in &order.items {
            println!(
                "    {:<30} x{:<3} @ {:>9}",
                item.name, item.cart_quantity, item.price
            );
        }
    }
    Ok(())
}
