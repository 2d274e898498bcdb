//! Cart and checkout commands.

use clap::Subcommand;

use albarka_core::ProductId;
use albarka_storefront::reconciler::QuantityChange;
use albarka_storefront::storage::FileStore;
use albarka_storefront::{Notification, Storefront};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart contents and total
    Show,
    /// Reserve units of a product into the cart
    Add {
        /// Product ID
        id: i64,

        /// How many units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a cart line's quantity by a signed delta
    Change {
        /// Product ID
        id: i64,

        /// Signed change (positive reserves more, negative releases)
        #[arg(short, long, allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a cart line, returning its units to stock
    Remove {
        /// Product ID
        id: i64,
    },
}

pub fn run(
    storefront: &mut Storefront<FileStore>,
    action: &CartAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CartAction::Show => show(storefront),
        CartAction::Add { id, quantity } => {
            match storefront.reserve(ProductId::new(*id), *quantity) {
                Ok(line) => notify(&Notification::success(format!(
                    "Added {} x{} to cart ({} in cart)",
                    line.name, quantity, line.cart_quantity
                ))),
                Err(err) => notify(&Notification::from(&err)),
            }
        }
        CartAction::Change { id, delta } => {
            match storefront.change_quantity(ProductId::new(*id), *delta) {
                Ok(QuantityChange::Updated(line)) => notify(&Notification::success(format!(
                    "{} now x{} in cart",
                    line.name, line.cart_quantity
                ))),
                Ok(QuantityChange::Removed) => {
                    notify(&Notification::info("Line removed from cart"));
                }
                Err(err) => notify(&Notification::from(&err)),
            }
        }
        CartAction::Remove { id } => match storefront.release(ProductId::new(*id)) {
            Some(line) => notify(&Notification::success(format!(
                "Removed {} from cart",
                line.name
            ))),
            None => notify(&Notification::info("That product is not in the cart")),
        },
    }
    Ok(())
}

pub fn checkout(
    storefront: &mut Storefront<FileStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let preview = storefront.open_checkout();
    println!(
        "Checking out {} line(s), total ${:.2}",
        preview.line_count, preview.total
    );

    match storefront.checkout() {
        Ok(order) => notify(&Notification::success(format!(
            "Order {} placed, total ${:.2}",
            order.id, order.total
        ))),
        Err(err) => notify(&Notification::from(&err)),
    }
    Ok(())
}

fn show(storefront: &Storefront<FileStore>) {
    let cart = storefront.cart();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in cart.lines() {
        println!(
            "{:>5}  {:<30} x{:<3} @ {:>9} = ${:.2}",
            line.product_id,
            line.name,
            line.cart_quantity,
            line.price,
            line.line_total()
        );
    }
    println!("Total: ${:.2} ({} units)", cart.total(), cart.unit_count());
}

fn notify(notification: &Notification) {
    println!("{}", notification.message);
}
