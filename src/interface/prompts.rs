use dialoguer::{Confirm, Input, Select};

use crate::error::{PriceError, Result};
use crate::models::{
    DayBand, PlanConfiguration, PricingTable, Promo, PromoKind, PromoScope, WeekBand,
};
use crate::pricing::constants::{MAX_SNACKS, MEAL_SLOTS};

/// Prompt for a decimal value.
fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PriceError::InvalidInput("Invalid number".to_string()))
}

/// Prompt for the calorie tier of each meal slot.
///
/// Choices are the priced meal tiers of the table plus "none".
pub fn prompt_meals(
    table: &PricingTable,
    current: &[u32; MEAL_SLOTS],
) -> Result<[u32; MEAL_SLOTS]> {
    let mut tiers = vec![0];
    tiers.extend(table.meal_tiers());

    let options: Vec<String> = tiers
        .iter()
        .map(|&tier| {
            if tier == 0 {
                "none".to_string()
            } else {
                format!("{} kcal", tier)
            }
        })
        .collect();

    let mut meals = [0; MEAL_SLOTS];
    for (slot, meal) in meals.iter_mut().enumerate() {
        let default = tiers.iter().position(|&t| t == current[slot]).unwrap_or(0);
        let selection = Select::new()
            .with_prompt(format!("Meal {}", slot + 1))
            .items(&options)
            .default(default)
            .interact()?;
        *meal = tiers[selection];
    }

    Ok(meals)
}

/// Prompt for the number of daily snacks.
pub fn prompt_snacks(current: u8) -> Result<u8> {
    let options: Vec<String> = (0..=MAX_SNACKS).map(|n| n.to_string()).collect();
    let selection = Select::new()
        .with_prompt("Snacks per day")
        .items(&options)
        .default(current.min(MAX_SNACKS) as usize)
        .interact()?;
    Ok(selection as u8)
}

/// Prompt for the day band.
pub fn prompt_days(current: DayBand) -> Result<DayBand> {
    let options: Vec<String> = DayBand::ALL.iter().map(|b| b.to_string()).collect();
    let default = DayBand::ALL.iter().position(|&b| b == current).unwrap_or(0);
    let selection = Select::new()
        .with_prompt("Days per week")
        .items(&options)
        .default(default)
        .interact()?;
    Ok(DayBand::ALL[selection])
}

/// Prompt for the week band.
pub fn prompt_weeks(current: WeekBand) -> Result<WeekBand> {
    let options: Vec<String> = WeekBand::ALL.iter().map(|b| b.to_string()).collect();
    let default = WeekBand::ALL.iter().position(|&b| b == current).unwrap_or(0);
    let selection = Select::new()
        .with_prompt("Weeks")
        .items(&options)
        .default(default)
        .interact()?;
    Ok(WeekBand::ALL[selection])
}

/// Prompt for a promo code's type, scope and value.
pub fn prompt_promo(current: &Promo) -> Result<Promo> {
    let kinds = [PromoKind::Percentage, PromoKind::Flat];
    let kind = Select::new()
        .with_prompt("Promo type")
        .items(&["percentage", "flat"][..])
        .default(kinds.iter().position(|k| *k == current.kind).unwrap_or(0))
        .interact()?;

    let scopes = [PromoScope::Meals, PromoScope::Snacks, PromoScope::Total];
    let scope = Select::new()
        .with_prompt("Promo applies to")
        .items(&["meals", "snacks", "total"][..])
        .default(scopes.iter().position(|s| *s == current.scope).unwrap_or(2))
        .interact()?;

    let value = prompt_number("Promo value (0 for none)", current.value)?;
    if value < 0.0 {
        return Err(PriceError::InvalidInput(
            "Promo value must not be negative".to_string(),
        ));
    }

    Ok(Promo {
        kind: kinds[kind],
        value,
        scope: scopes[scope],
    })
}

/// Prompt for how many days of the current plan were already delivered.
pub fn prompt_days_consumed(total_days: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt(format!("Days already consumed (of {})", total_days))
        .default("0".to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PriceError::InvalidInput("Invalid number of days".to_string()))
}

/// Prompt for a label when saving a plan.
pub fn prompt_label() -> Result<String> {
    let label: String = Input::new()
        .with_prompt("Label for this plan (Enter for default)")
        .allow_empty(true)
        .interact_text()?;
    Ok(label)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect a full plan configuration, starting from `current`.
pub fn collect_plan(
    table: &PricingTable,
    current: &PlanConfiguration,
) -> Result<PlanConfiguration> {
    let meal_calorie_tiers = prompt_meals(table, &current.meal_calorie_tiers)?;
    let snack_count = prompt_snacks(current.snack_count)?;
    let day_count = prompt_days(current.day_count)?;
    let week_count = prompt_weeks(current.week_count)?;
    let surcharge_percent =
        prompt_number("Surcharge % (negative for a discount)", current.surcharge_percent)?;
    let promo = prompt_promo(&current.promo)?;

    let config = PlanConfiguration {
        meal_calorie_tiers,
        snack_count,
        day_count,
        week_count,
        surcharge_percent,
        reduction_percent: current.reduction_percent,
        markup_percent: current.markup_percent,
        promo,
    };
    config.validate()?;
    Ok(config)
}
