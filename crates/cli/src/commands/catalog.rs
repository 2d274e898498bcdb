//! Catalog browsing commands.

use clap::Subcommand;

use albarka_storefront::catalog::CatalogFilter;
use albarka_storefront::models::Product;
use albarka_storefront::storage::FileStore;
use albarka_storefront::Storefront;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List products, optionally filtered
    List {
        /// Case-insensitive substring to match against name and description
        #[arg(short, long)]
        query: Option<String>,

        /// Exact category to match
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List products at or below the low-stock threshold
    LowStock,
    /// Show catalog-wide rating stats
    TrustSignals,
}

pub fn run(
    storefront: &Storefront<FileStore>,
    action: &CatalogAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::List { query, category } => {
            let filter = CatalogFilter {
                query: query.clone(),
                category: category.clone(),
            };
            let products = storefront.filtered_catalog(&filter);
            if products.is_empty() {
                println!("No products matched.");
            }
            for product in products {
                print_product(product);
            }
        }
        CatalogAction::LowStock => {
            let products = storefront.low_stock();
            if products.is_empty() {
                println!(
                    "No products at or below {} units.",
                    storefront.config().low_stock_threshold
                );
            }
            for product in products {
                println!(
                    "{:>5}  {:<30} {:>3} left",
                    product.id, product.name, product.quantity
                );
            }
        }
        CatalogAction::TrustSignals => {
            let signals = storefront.trust_signals();
            println!(
                "Average rating {:.1} across {} reviews",
                signals.average_rating, signals.total_reviews
            );
        }
    }
    Ok(())
}

fn print_product(product: &Product) {
    let stock = if product.in_stock() {
        format!("{} in stock", product.quantity)
    } else {
        "out of stock".to_string()
    };
    println!(
        "{:>5}  {:<30} {:<12} {:>9}  {}",
        product.id, product.name, product.category, product.price, stock
    );
}
