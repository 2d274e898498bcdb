//! Albarka CLI - the command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! albarka catalog list
//! albarka catalog list --query wireless --category electronics
//!
//! # Manage the cart
//! albarka cart add 3 --quantity 2
//! albarka cart change 3 --delta -1
//! albarka cart show
//!
//! # Buy
//! albarka checkout
//! albarka orders
//!
//! # Admin
//! albarka product upsert --name "Clay Mug" --category home --price 14.00 --quantity 30
//! albarka product delete 9
//! albarka report
//! ```
//!
//! State lives in a data directory (`ALBARKA_DATA_DIR`, default
//! `./albarka-data`), one JSON file per storage key, so every invocation
//! picks up where the last one left off.

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI's job is to print.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use tracing::error;

use albarka_storefront::config::StorefrontConfig;
use albarka_storefront::storage::FileStore;
use albarka_storefront::Storefront;

mod commands;

#[derive(Parser)]
#[command(name = "albarka")]
#[command(author, version, about = "Albarka Store command-line storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Finalize the cart into an order
    Checkout,
    /// Show the order history
    Orders,
    /// Create, edit, or delete products
    Product {
        #[command(subcommand)]
        action: commands::product::ProductAction,
    },
    /// Show the sales report
    Report(commands::report::ReportArgs),
    /// Send a message to the store
    Contact(commands::contact::ContactArgs),
    /// Toggle the light/dark theme preference
    Theme,
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    if let Err(e) = run() {
        error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env()?;
    let store = FileStore::open(&config.data_dir)?;
    let mut storefront = Storefront::open(store, config);

    match cli.command {
        Commands::Catalog { action } => commands::catalog::run(&storefront, &action),
        Commands::Cart { action } => commands::cart::run(&mut storefront, &action),
        Commands::Checkout => commands::cart::checkout(&mut storefront),
        Commands::Orders => commands::orders::run(&storefront),
        Commands::Product { action } => commands::product::run(&mut storefront, action),
        Commands::Report(args) => commands::report::run(&storefront, &args),
        Commands::Contact(args) => commands::contact::run(&storefront, args),
        Commands::Theme => {
            let theme = storefront.toggle_theme();
            println!("Theme is now {theme}");
            Ok(())
        }
    }
}
