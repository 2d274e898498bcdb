//! Product management commands.

use clap::{Args, Subcommand};

use albarka_core::{Price, ProductId, Rating};
use albarka_storefront::models::ProductInput;
use albarka_storefront::storage::FileStore;
use albarka_storefront::Storefront;

#[derive(Subcommand)]
pub enum ProductAction {
    /// Create a product, or edit one when --id is given
    Upsert(UpsertArgs),
    /// Delete a product unconditionally
    Delete {
        /// Product ID
        id: i64,
    },
}

#[derive(Args)]
pub struct UpsertArgs {
    /// Existing product ID to edit; omit to create
    #[arg(long)]
    id: Option<i64>,

    /// Display name
    #[arg(long)]
    name: String,

    /// Longer description
    #[arg(long, default_value = "")]
    description: String,

    /// Category slug (e.g. electronics, home, clothing)
    #[arg(long)]
    category: String,

    /// Unit price, e.g. 14.00
    #[arg(long)]
    price: Price,

    /// Units in stock
    #[arg(long)]
    quantity: u32,

    /// Image URL
    #[arg(long)]
    picture: Option<String>,

    /// Average rating, 0 to 5
    #[arg(long)]
    rating: Option<f32>,

    /// Number of reviews behind the rating
    #[arg(long)]
    review_count: Option<u32>,
}

pub fn run(
    storefront: &mut Storefront<FileStore>,
    action: ProductAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProductAction::Upsert(args) => {
            let rating = args.rating.map(Rating::try_from).transpose()?;
            let input = ProductInput {
                id: args.id.map(ProductId::new),
                name: args.name,
                description: args.description,
                category: args.category,
                price: args.price,
                quantity: args.quantity,
                picture: args.picture,
                rating,
                review_count: args.review_count,
            };
            let product = storefront.upsert_product(input)?;
            println!("Saved product {}: {}", product.id, product.name);
        }
        ProductAction::Delete { id } => {
            if storefront.delete_product(ProductId::new(id))? {
                println!("Deleted product {id}");
            } else {
                println!("No product with ID {id}");
            }
        }
    }
    Ok(())
}
