use serde::Serialize;

use crate::models::{DayBand, PlanConfiguration, PricingTable, WeekBand};
use crate::pricing::compute_breakdown;
use crate::pricing::constants::{MAX_SNACKS, MEAL_SLOTS};

/// Settings for a rate sheet sweep.
#[derive(Debug, Clone)]
pub struct RateSheetConfig {
    /// Calorie tier used for every occupied meal slot.
    pub tier: u32,
    pub max_meals: usize,
    pub max_snacks: u8,
    pub surcharge_percent: f64,
}

impl Default for RateSheetConfig {
    fn default() -> Self {
        Self {
            tier: 800,
            max_meals: MEAL_SLOTS,
            max_snacks: MAX_SNACKS,
            surcharge_percent: 0.0,
        }
    }
}

/// One priced plan in the sweep.
#[derive(Debug, Clone, Serialize)]
pub struct RateSheetRow {
    pub meals: usize,
    pub snacks: u8,
    pub days: u32,
    pub weeks: u32,
    pub total_days: u32,
    pub plan_price: f64,
    pub bag_fee: f64,
    pub grand_total: f64,
    pub savings: f64,
}

impl RateSheetRow {
    /// Grand total spread over the service days.
    pub fn per_day(&self) -> f64 {
        if self.total_days == 0 {
            0.0
        } else {
            self.grand_total / self.total_days as f64
        }
    }

    /// Average price of a single meal or snack.
    pub fn per_item(&self) -> f64 {
        let items = (self.meals + self.snacks as usize) as u32 * self.total_days;
        if items == 0 {
            0.0
        } else {
            self.grand_total / items as f64
        }
    }
}

/// Price every combination of meal count, snack count, day band and week band.
///
/// Rows come back ordered by meals, snacks, days, weeks.
pub fn sweep(table: &PricingTable, config: &RateSheetConfig) -> Vec<RateSheetRow> {
    let max_meals = config.max_meals.clamp(1, MEAL_SLOTS);
    let max_snacks = config.max_snacks.min(MAX_SNACKS);
    let mut rows = Vec::new();

    for meals in 1..=max_meals {
        let tiers = vec![config.tier; meals];
        for snacks in 0..=max_snacks {
            for days in DayBand::ALL {
                for weeks in WeekBand::ALL {
                    let mut plan = PlanConfiguration::with_meals(&tiers, snacks, days, weeks);
                    plan.surcharge_percent = config.surcharge_percent;

                    let breakdown = compute_breakdown(&plan, table);
                    rows.push(RateSheetRow {
                        meals,
                        snacks,
                        days: days.days(),
                        weeks: weeks.weeks(),
                        total_days: plan.total_days(),
                        plan_price: breakdown.price_after_week_discount,
                        bag_fee: breakdown.total_bag_fee,
                        grand_total: breakdown.grand_total,
                        savings: breakdown.savings,
                    });
                }
            }
        }
    }

    tracing::debug!(rows = rows.len(), tier = config.tier, "rate sheet swept");
    rows
}

/// Indices of the `k` cheapest rows per day, cheapest first.
pub fn cheapest_per_day(rows: &[RateSheetRow], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    indices.sort_by(|&a, &b| {
        rows[a]
            .per_day()
            .partial_cmp(&rows[b].per_day())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(k);
    indices
}
