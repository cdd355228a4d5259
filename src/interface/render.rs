use crate::models::{
    AdjustmentResult, AdjustmentStatus, PlanConfiguration, PriceBreakdown, PricingTable, PromoKind,
    SavedPlanSnapshot,
};
use crate::pricing::constants::CURRENCY;

fn line(label: &str, amount: f64) {
    println!("  {:<28} {:>10.2} {}", label, amount, CURRENCY);
}

/// Display an itemized price breakdown.
pub fn display_breakdown(config: &PlanConfiguration, breakdown: &PriceBreakdown) {
    println!();
    println!("=== Plan Price ===");
    println!("{}", config.summary());
    println!();

    for (slot, (tier, cost)) in config
        .meal_calorie_tiers
        .iter()
        .zip(breakdown.meal_costs.iter())
        .enumerate()
    {
        if *tier == 0 {
            continue;
        }
        line(&format!("Meal {} ({} kcal) / day", slot + 1, tier), *cost);
    }
    if config.snack_count > 0 {
        line(&format!("Snacks x{} / day", config.snack_count), breakdown.daily_snack_cost);
    }
    line("Total / day", breakdown.total_daily);
    println!();

    line("Subtotal", breakdown.subtotal_plan);
    if breakdown.day_discount_amount != 0.0 {
        line(&format!("{}-day discount", config.day_count), -breakdown.day_discount_amount);
    }
    if breakdown.surcharge_amount != 0.0 {
        line(
            &format!("Surcharge ({:+}%)", config.surcharge_percent),
            breakdown.surcharge_amount,
        );
    }
    if breakdown.week_discount_amount != 0.0 {
        line(&format!("{}-week discount", config.week_count), -breakdown.week_discount_amount);
    }
    line("Plan price", breakdown.price_after_week_discount);

    if breakdown.promo_discount_amount != 0.0 {
        let label = match config.promo.kind {
            PromoKind::Percentage => format!("Promo ({}% off)", config.promo.value),
            PromoKind::Flat => "Promo".to_string(),
        };
        line(&label, -breakdown.promo_discount_amount);
    }
    line("Bag fee", breakdown.total_bag_fee);

    println!("  {}", "-".repeat(43));
    line("Grand total", breakdown.grand_total);
    println!();

    if breakdown.savings > 0.0 {
        println!(
            "You save {:.2} {} (reference price {:.2} {})",
            breakdown.savings, CURRENCY, breakdown.anchored_base, CURRENCY
        );
        println!();
    }
}

/// Display a plan-change settlement.
pub fn display_adjustment(
    old_config: &PlanConfiguration,
    new_config: &PlanConfiguration,
    days_consumed: u32,
    result: &AdjustmentResult,
) {
    println!();
    println!("=== Plan Adjustment ===");
    println!("Current: {}", old_config.summary());
    println!("New:     {}", new_config.summary());
    println!(
        "Days consumed: {}  Remaining days: {}",
        days_consumed, result.remaining_days
    );
    println!();

    line("Daily difference", result.daily_difference);
    line("Subtotal adjustment", result.subtotal_adjustment);
    line("Promo adjustment", -result.promo_adjustment);
    line("Final adjustment", result.final_adjustment);
    println!();

    match result.status {
        AdjustmentStatus::NoChange => println!("No price change."),
        status => println!("{}", status),
    }
    println!();
}

/// Display saved plans, newest first.
pub fn display_snapshots(snapshots: &[SavedPlanSnapshot]) {
    if snapshots.is_empty() {
        println!("No saved plans.");
        return;
    }

    println!();
    println!("=== Saved Plans ({}) ===", snapshots.len());
    println!();

    let max_label_len = snapshots.iter().map(|s| s.label.len()).max().unwrap_or(10);

    for snapshot in snapshots {
        println!(
            "  {:>13}  {:<width$}  {}  {:>10.2} {}",
            snapshot.id,
            snapshot.label,
            snapshot.saved_at.format("%Y-%m-%d %H:%M"),
            snapshot.grand_total,
            CURRENCY,
            width = max_label_len
        );
        println!("  {:>13}  {}", "", snapshot.config.summary());
    }

    println!();
}

/// Display the pricing table.
pub fn display_table(table: &PricingTable) {
    println!();
    println!("=== Pricing Table ===");
    println!();

    println!("Unit prices:");
    for (tier, price) in &table.meal_prices {
        println!("  {:>4} kcal  {:>7.2} {}", tier, price, CURRENCY);
    }

    println!("Meal slot discounts:");
    for (slot, percent) in table.meal_discounts.iter().enumerate() {
        println!("  meal {}  {:>5}%", slot + 1, percent);
    }

    println!("Snack discounts:");
    for (ordinal, percent) in &table.snack_discounts {
        println!("  snack {}  {:>5}%", ordinal, percent);
    }

    println!("Day discounts:");
    for (band, percent) in &table.day_discounts {
        println!("  {} days  {:>5}%", band, percent);
    }

    println!("Week discounts:");
    for (band, percent) in &table.week_discounts {
        println!("  {} weeks  {:>5}%", band, percent);
    }

    println!("Bag fee per day: {:.2} {}", table.bag_fee, CURRENCY);
    println!();
}
