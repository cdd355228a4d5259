use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meal_plan_pricer_rs::models::PricingTable;
use meal_plan_pricer_rs::ratesheet::{
    RateSheetConfig, cheapest_per_day, print_cheapest, sweep, write_csv, write_summary_json,
};
use meal_plan_pricer_rs::state::load_table;

#[derive(Parser, Debug)]
#[command(name = "rate_sheet")]
#[command(about = "Price every plan combination and export a rate sheet")]
struct Args {
    /// Pricing table JSON file (built-in standard table when omitted)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Use the legacy price list
    #[arg(long, conflicts_with = "table")]
    legacy_pricing: bool,

    /// Calorie tier for every meal slot
    #[arg(long, default_value = "800")]
    tier: u32,

    /// Surcharge percent applied to every plan
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    surcharge: f64,

    /// Output CSV file for all rows
    #[arg(long, default_value = "rate_sheet.csv")]
    csv: PathBuf,

    /// Output JSON file for the summary
    #[arg(long, default_value = "rate_sheet.json")]
    json: PathBuf,

    /// Number of cheapest plans to display
    #[arg(long, default_value = "10")]
    topk: usize,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meal_plan_pricer_rs=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let table = match (&args.table, args.legacy_pricing) {
        (Some(path), _) => match load_table(path) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("Error loading pricing table {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        (None, true) => PricingTable::legacy(),
        (None, false) => PricingTable::standard(),
    };

    if table.meal_price(args.tier) == 0.0 {
        eprintln!("Error: tier {} has no price in the table", args.tier);
        std::process::exit(1);
    }

    let config = RateSheetConfig {
        tier: args.tier,
        surcharge_percent: args.surcharge,
        ..Default::default()
    };

    let rows = sweep(&table, &config);
    println!("Priced {} plan combinations at {} kcal", rows.len(), args.tier);

    let cheapest = cheapest_per_day(&rows, args.topk);
    print_cheapest(&rows, &cheapest);

    if let Err(e) = write_csv(&rows, &args.csv) {
        eprintln!("Error writing CSV: {}", e);
        std::process::exit(1);
    }
    println!("Wrote all rows to {:?}", args.csv);

    if let Err(e) = write_summary_json(&table, &config, &rows, &cheapest, &args.json) {
        eprintln!("Error writing JSON: {}", e);
        std::process::exit(1);
    }
    println!("Wrote summary to {:?}", args.json);
}
