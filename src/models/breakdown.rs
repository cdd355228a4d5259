use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pricing::constants::{CURRENCY, MEAL_SLOTS};

/// Itemized result of pricing one plan.
///
/// Built once by the pricing engine and never changed afterwards, so two
/// breakdowns can be compared figure by figure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Discounted daily cost of each meal slot.
    pub meal_costs: [f64; MEAL_SLOTS],

    pub daily_meal_cost: f64,
    pub daily_base_meal_cost: f64,
    pub daily_snack_cost: f64,
    pub daily_base_snack_cost: f64,

    pub total_daily: f64,
    pub total_base_daily: f64,

    pub subtotal_plan: f64,
    pub subtotal_base_plan: f64,

    pub day_discount_amount: f64,
    pub price_after_day_discount: f64,

    /// Signed: negative when the surcharge percent is negative.
    pub surcharge_amount: f64,
    pub price_after_surcharge: f64,

    pub week_discount_amount: f64,
    pub price_after_week_discount: f64,

    pub total_bag_fee: f64,

    /// Display-only reference price; never charged.
    pub anchored_base: f64,
    pub savings: f64,

    pub promo_discount_amount: f64,
    pub grand_total: f64,
}

/// Direction and magnitude of a plan-change settlement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "amount", rename_all = "kebab-case")]
pub enum AdjustmentStatus {
    TopUpRequired(f64),
    CreditDue(f64),
    NoChange,
}

impl AdjustmentStatus {
    /// Absolute amount owed or credited.
    pub fn magnitude(&self) -> f64 {
        match self {
            AdjustmentStatus::TopUpRequired(amount) | AdjustmentStatus::CreditDue(amount) => {
                *amount
            }
            AdjustmentStatus::NoChange => 0.0,
        }
    }
}

impl fmt::Display for AdjustmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentStatus::TopUpRequired(amount) => {
                write!(f, "Top-up required: {:.2} {}", amount, CURRENCY)
            }
            AdjustmentStatus::CreditDue(amount) => {
                write!(f, "Credit due: {:.2} {}", amount, CURRENCY)
            }
            AdjustmentStatus::NoChange => write!(f, "No change"),
        }
    }
}

/// Settlement for switching plans partway through a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentResult {
    /// Days of the old plan still to be delivered.
    pub remaining_days: u32,

    /// Total days of the new plan, for display.
    pub new_plan_days: u32,

    pub daily_difference: f64,
    pub subtotal_adjustment: f64,
    pub promo_adjustment: f64,

    /// Positive = customer pays, negative = customer is credited.
    pub final_adjustment: f64,

    pub status: AdjustmentStatus,
}

impl AdjustmentResult {
    /// All-zero result for plans with no service days.
    pub fn neutral() -> Self {
        Self {
            remaining_days: 0,
            new_plan_days: 0,
            daily_difference: 0.0,
            subtotal_adjustment: 0.0,
            promo_adjustment: 0.0,
            final_adjustment: 0.0,
            status: AdjustmentStatus::NoChange,
        }
    }
}
