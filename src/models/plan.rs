use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PriceError, Result};
use crate::models::band::{DayBand, WeekBand, plan_days};
use crate::pricing::constants::*;

/// How a promo value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PromoKind {
    #[default]
    Percentage,
    Flat,
}

/// Which part of the plan a promo discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PromoScope {
    Meals,
    Snacks,
    #[default]
    #[serde(alias = "both")]
    Total,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Promo {
    #[serde(rename = "type", default)]
    pub kind: PromoKind,

    #[serde(default)]
    pub value: f64,

    #[serde(default)]
    pub scope: PromoScope,
}

/// A customer's chosen plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfiguration {
    /// Calorie tier per meal slot; 0 means no meal in that slot.
    #[serde(rename = "mealCalories", deserialize_with = "deserialize_meal_tiers")]
    pub meal_calorie_tiers: [u32; MEAL_SLOTS],

    #[serde(rename = "numSnacks")]
    pub snack_count: u8,

    #[serde(rename = "numDays")]
    pub day_count: DayBand,

    #[serde(rename = "numWeeks")]
    pub week_count: WeekBand,

    /// Signed: negative values act as a discount.
    #[serde(rename = "surchargePercent", default)]
    pub surcharge_percent: f64,

    #[serde(rename = "reductionPercent", default)]
    pub reduction_percent: f64,

    #[serde(rename = "markupPercent", default)]
    pub markup_percent: f64,

    #[serde(default)]
    pub promo: Promo,
}

impl Default for PlanConfiguration {
    fn default() -> Self {
        Self {
            meal_calorie_tiers: DEFAULT_MEALS,
            snack_count: DEFAULT_SNACKS,
            day_count: DayBand::Five,
            week_count: WeekBand::Four,
            surcharge_percent: 0.0,
            reduction_percent: DEFAULT_REDUCTION_PERCENT,
            markup_percent: DEFAULT_MARKUP_PERCENT,
            promo: Promo::default(),
        }
    }
}

impl PlanConfiguration {
    /// Build a plan from any number of meal tiers, padded or truncated to five slots.
    pub fn with_meals(
        meals: &[u32],
        snack_count: u8,
        day_count: DayBand,
        week_count: WeekBand,
    ) -> Self {
        Self {
            meal_calorie_tiers: pad_meal_tiers(meals),
            snack_count,
            day_count,
            week_count,
            ..Default::default()
        }
    }

    /// Total service days in the plan.
    pub fn total_days(&self) -> u32 {
        plan_days(self.day_count, self.week_count)
    }

    /// Number of occupied meal slots.
    pub fn meal_count(&self) -> usize {
        self.meal_calorie_tiers.iter().filter(|&&tier| tier > 0).count()
    }

    /// Form-level checks. The pricing engine itself accepts any configuration.
    pub fn validate(&self) -> Result<()> {
        if self.snack_count > MAX_SNACKS {
            return Err(PriceError::InvalidInput(format!(
                "snack count must be 0..={} (got {})",
                MAX_SNACKS, self.snack_count
            )));
        }

        let percents = [
            ("surcharge", self.surcharge_percent),
            ("reduction", self.reduction_percent),
            ("markup", self.markup_percent),
            ("promo value", self.promo.value),
        ];
        for (name, value) in percents {
            if !value.is_finite() {
                return Err(PriceError::InvalidInput(format!("{} must be a number", name)));
            }
        }
        if self.promo.value < 0.0 {
            return Err(PriceError::InvalidInput(
                "promo value must not be negative".to_string(),
            ));
        }
        let shares = [
            ("reduction", self.reduction_percent),
            ("markup", self.markup_percent),
        ];
        for (name, value) in shares {
            if !(0.0..=100.0).contains(&value) {
                return Err(PriceError::InvalidInput(format!(
                    "{} percent must be within 0-100 (got {})",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// One-line summary for listings and logs.
    pub fn summary(&self) -> String {
        let meals: Vec<String> = self
            .meal_calorie_tiers
            .iter()
            .filter(|&&tier| tier > 0)
            .map(|tier| tier.to_string())
            .collect();
        format!(
            "meals [{}], {} snacks, {} days x {} weeks",
            meals.join(", "),
            self.snack_count,
            self.day_count,
            self.week_count
        )
    }
}

/// Pad with empty slots or drop extras so there are exactly five meal slots.
pub fn pad_meal_tiers(meals: &[u32]) -> [u32; MEAL_SLOTS] {
    let mut slots = [0; MEAL_SLOTS];
    for (slot, tier) in slots.iter_mut().zip(meals) {
        *slot = *tier;
    }
    slots
}

fn deserialize_meal_tiers<'de, D>(
    deserializer: D,
) -> std::result::Result<[u32; MEAL_SLOTS], D::Error>
where
    D: Deserializer<'de>,
{
    let meals = Vec::<u32>::deserialize(deserializer)?;
    Ok(pad_meal_tiers(&meals))
}
