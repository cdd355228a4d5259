use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::PricingTable;
use crate::pricing::constants::CURRENCY;
use crate::ratesheet::grid::{RateSheetConfig, RateSheetRow};

/// Round to n decimal places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write all rows to a CSV file.
pub fn write_csv(rows: &[RateSheetRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "meals",
        "snacks",
        "days",
        "weeks",
        "total_days",
        "plan_price",
        "bag_fee",
        "grand_total",
        "per_day",
        "per_item",
        "savings",
    ])?;

    for row in rows {
        wtr.write_record([
            row.meals.to_string(),
            row.snacks.to_string(),
            row.days.to_string(),
            row.weeks.to_string(),
            row.total_days.to_string(),
            format!("{:.2}", row.plan_price),
            format!("{:.2}", row.bag_fee),
            format!("{:.2}", row.grand_total),
            format!("{:.2}", row.per_day()),
            format!("{:.2}", row.per_item()),
            format!("{:.2}", row.savings),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a JSON summary: the table used, the sweep settings and the cheapest plans.
pub fn write_summary_json(
    table: &PricingTable,
    config: &RateSheetConfig,
    rows: &[RateSheetRow],
    cheapest: &[usize],
    path: &Path,
) -> Result<()> {
    let json = serde_json::json!({
        "currency": CURRENCY,
        "tier": config.tier,
        "surcharge_percent": config.surcharge_percent,
        "rows": rows.len(),
        "table": table,
        "cheapest_per_day": cheapest.iter().map(|&i| {
            let row = &rows[i];
            serde_json::json!({
                "meals": row.meals,
                "snacks": row.snacks,
                "days": row.days,
                "weeks": row.weeks,
                "grand_total": round_to(row.grand_total, 2),
                "per_day": round_to(row.per_day(), 2),
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print the cheapest plans per day.
pub fn print_cheapest(rows: &[RateSheetRow], cheapest: &[usize]) {
    println!("\n=== {} Cheapest Plans (per day) ===\n", cheapest.len());

    for (rank, &idx) in cheapest.iter().enumerate() {
        let row = &rows[idx];
        println!(
            "#{}: {} meals + {} snacks, {} days x {} weeks  {:.2} {}/day  (total {:.2}, per item {:.2})",
            rank + 1,
            row.meals,
            row.snacks,
            row.days,
            row.weeks,
            row.per_day(),
            CURRENCY,
            row.grand_total,
            row.per_item()
        );
    }
    println!();
}
