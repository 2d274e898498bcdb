//! Sales report command.

use clap::Args;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use albarka_storefront::report::DateRange;
use albarka_storefront::storage::FileStore;
use albarka_storefront::Storefront;

#[derive(Args)]
pub struct ReportArgs {
    /// Include orders on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Include orders before the end of this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

pub fn run(
    storefront: &Storefront<FileStore>,
    args: &ReportArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let range = DateRange {
        from: args.from.map(day_start),
        to: args.to.map(day_end),
    };
    let report = storefront.sales_report(&range);

    println!("Revenue:     ${:.2}", report.revenue);
    println!("Orders:      {}", report.order_count);
    println!("Items sold:  {}", report.items_sold);
    println!(
        "Conversion:  {:.1}% ({} opened / {} completed)",
        report.funnel.conversion_rate(),
        report.funnel.opened,
        report.funnel.completed
    );

    if !report.daily_sales.is_empty() {
        println!("\nDaily sales:");
        for (day, revenue) in &report.daily_sales {
            println!("  {day}  ${revenue:.2}");
        }
    }

    if !report.top_products.is_empty() {
        println!("\nTop products:");
        for (name, units) in &report.top_products {
            println!("  {name:<30} {units} sold");
        }
    }

    let low = storefront.low_stock();
    if !low.is_empty() {
        println!("\nLow stock:");
        for product in low {
            println!("  {:<30} {} left", product.name, product.quantity);
        }
    }

    Ok(())
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap_or_default())
}

// The range is inclusive, so "to" means the last instant of that day.
fn day_end(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .map_or_else(|| day_start(day), |dt| Utc.from_utc_datetime(&dt))
}
