use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PriceError, Result};
use crate::models::band::{DayBand, WeekBand};
use crate::pricing::constants::*;

/// Admin-editable price list and discount schedule.
///
/// All discounts are "percent off" stored as 0-100. Every lookup treats a
/// missing key as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(rename = "mealPrices")]
    pub meal_prices: BTreeMap<u32, f64>,

    #[serde(rename = "mealDiscounts", default)]
    pub meal_discounts: Vec<f64>,

    #[serde(rename = "snackDiscounts", default)]
    pub snack_discounts: BTreeMap<u8, f64>,

    #[serde(rename = "dayDiscounts", default)]
    pub day_discounts: BTreeMap<DayBand, f64>,

    #[serde(rename = "weekDiscounts", default)]
    pub week_discounts: BTreeMap<WeekBand, f64>,

    #[serde(rename = "bagFee", default)]
    pub bag_fee: f64,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl PricingTable {
    /// The current price list.
    pub fn standard() -> Self {
        Self {
            meal_prices: STANDARD_MEAL_PRICES.into_iter().collect(),
            meal_discounts: STANDARD_MEAL_DISCOUNTS.to_vec(),
            snack_discounts: STANDARD_SNACK_DISCOUNTS.into_iter().collect(),
            day_discounts: band_map(&STANDARD_DAY_DISCOUNTS),
            week_discounts: band_map(&STANDARD_WEEK_DISCOUNTS),
            bag_fee: STANDARD_BAG_FEE,
        }
    }

    /// The older price list: lower unit prices, slot discounts only, no bag fee.
    pub fn legacy() -> Self {
        Self {
            meal_prices: LEGACY_MEAL_PRICES.into_iter().collect(),
            meal_discounts: LEGACY_MEAL_DISCOUNTS.to_vec(),
            snack_discounts: (1..=MAX_SNACKS).map(|ordinal| (ordinal, 0.0)).collect(),
            day_discounts: DayBand::ALL.into_iter().map(|band| (band, 0.0)).collect(),
            week_discounts: WeekBand::ALL.into_iter().map(|band| (band, 0.0)).collect(),
            bag_fee: LEGACY_BAG_FEE,
        }
    }

    /// Copy of this table with every snack discount zeroed.
    pub fn without_snack_discounts(&self) -> Self {
        let mut table = self.clone();
        for percent in table.snack_discounts.values_mut() {
            *percent = 0.0;
        }
        table
    }

    /// Unit price for a calorie tier (0 for unknown tiers).
    #[inline]
    pub fn meal_price(&self, tier: u32) -> f64 {
        self.meal_prices.get(&tier).copied().unwrap_or(0.0)
    }

    /// Unit price of one snack.
    #[inline]
    pub fn snack_price(&self) -> f64 {
        self.meal_price(SNACK_CALORIE_TIER)
    }

    /// Percent off for a meal slot index.
    #[inline]
    pub fn meal_discount(&self, slot: usize) -> f64 {
        self.meal_discounts.get(slot).copied().unwrap_or(0.0)
    }

    /// Percent off for a 1-based snack ordinal.
    #[inline]
    pub fn snack_discount(&self, ordinal: u8) -> f64 {
        self.snack_discounts.get(&ordinal).copied().unwrap_or(0.0)
    }

    /// Percent off for a day band. The 5-day band never discounts.
    #[inline]
    pub fn day_discount(&self, band: DayBand) -> f64 {
        match band {
            DayBand::Five => 0.0,
            other => self.day_discounts.get(&other).copied().unwrap_or(0.0),
        }
    }

    /// Percent off for a week band.
    #[inline]
    pub fn week_discount(&self, band: WeekBand) -> f64 {
        self.week_discounts.get(&band).copied().unwrap_or(0.0)
    }

    /// Calorie tiers with a price, excluding the snack tier.
    pub fn meal_tiers(&self) -> Vec<u32> {
        self.meal_prices
            .keys()
            .copied()
            .filter(|&tier| tier != SNACK_CALORIE_TIER)
            .collect()
    }

    /// Check ranges and key domains. Called by the table loader, never by the engines.
    pub fn validate(&self) -> Result<()> {
        for (tier, price) in &self.meal_prices {
            if !price.is_finite() || *price < 0.0 {
                return Err(PriceError::InvalidTable(format!(
                    "price for tier {} must be a non-negative amount (got {})",
                    tier, price
                )));
            }
        }

        if self.meal_discounts.len() > MEAL_SLOTS {
            return Err(PriceError::InvalidTable(format!(
                "at most {} meal slot discounts allowed (got {})",
                MEAL_SLOTS,
                self.meal_discounts.len()
            )));
        }
        for (slot, percent) in self.meal_discounts.iter().enumerate() {
            check_percent(&format!("meal slot {}", slot + 1), *percent)?;
        }

        for (ordinal, percent) in &self.snack_discounts {
            if !(1..=MAX_SNACKS).contains(ordinal) {
                return Err(PriceError::InvalidTable(format!(
                    "snack ordinal must be 1..={} (got {})",
                    MAX_SNACKS, ordinal
                )));
            }
            check_percent(&format!("snack {}", ordinal), *percent)?;
        }

        for (band, percent) in &self.day_discounts {
            check_percent(&format!("{}-day band", band), *percent)?;
        }
        if self.day_discounts.get(&DayBand::Five).is_some_and(|p| *p != 0.0) {
            return Err(PriceError::InvalidTable(
                "the 5-day band discount is fixed at 0".to_string(),
            ));
        }

        for (band, percent) in &self.week_discounts {
            check_percent(&format!("{}-week band", band), *percent)?;
        }

        if !self.bag_fee.is_finite() || self.bag_fee < 0.0 {
            return Err(PriceError::InvalidTable(format!(
                "bag fee must be a non-negative amount (got {})",
                self.bag_fee
            )));
        }

        Ok(())
    }
}

fn check_percent(what: &str, percent: f64) -> Result<()> {
    if percent.is_finite() && (0.0..=100.0).contains(&percent) {
        Ok(())
    } else {
        Err(PriceError::InvalidTable(format!(
            "{} discount must be within 0-100 (got {})",
            what, percent
        )))
    }
}

fn band_map<B>(entries: &[(u32, f64)]) -> BTreeMap<B, f64>
where
    B: TryFrom<u32> + Ord,
{
    entries
        .iter()
        .filter_map(|&(key, percent)| B::try_from(key).ok().map(|band| (band, percent)))
        .collect()
}
