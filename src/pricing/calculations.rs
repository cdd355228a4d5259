use crate::models::{
    DayBand, PlanConfiguration, PriceBreakdown, PricingTable, PromoKind, PromoScope, WeekBand,
};
use crate::pricing::constants::MEAL_SLOTS;

/// Convert a stored 0-100 percentage to a fraction.
#[inline]
pub fn fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Daily cost of each meal slot after its slot discount.
///
/// Empty slots (tier 0) cost nothing.
pub fn meal_slot_costs(tiers: &[u32; MEAL_SLOTS], table: &PricingTable) -> [f64; MEAL_SLOTS] {
    let mut costs = [0.0; MEAL_SLOTS];
    for (slot, (cost, &tier)) in costs.iter_mut().zip(tiers).enumerate() {
        if tier == 0 {
            continue;
        }
        *cost = table.meal_price(tier) * (1.0 - fraction(table.meal_discount(slot)));
    }
    costs
}

/// Daily meal cost before slot discounts.
pub fn base_meal_cost(tiers: &[u32; MEAL_SLOTS], table: &PricingTable) -> f64 {
    tiers
        .iter()
        .filter(|&&tier| tier > 0)
        .map(|&tier| table.meal_price(tier))
        .sum()
}

/// Daily snack cost. Each ordinal 1..=count carries its own discount.
pub fn snack_cost(count: u8, table: &PricingTable, discounted: bool) -> f64 {
    let unit = table.snack_price();
    (1..=count)
        .map(|ordinal| {
            let percent = if discounted {
                table.snack_discount(ordinal)
            } else {
                0.0
            };
            unit * (1.0 - fraction(percent))
        })
        .sum()
}

/// Day-count discount over the whole plan.
///
/// Tiers accumulate: a 7-day plan gets the 6-day component plus the 7-day
/// component, each taken from the undiscounted daily rate.
pub fn day_discount_amount(
    total_daily: f64,
    days: DayBand,
    weeks: WeekBand,
    table: &PricingTable,
) -> f64 {
    let component6 = total_daily * fraction(table.day_discount(DayBand::Six));
    let component7 = total_daily * fraction(table.day_discount(DayBand::Seven));
    let weeks = weeks.weeks() as f64;

    match days {
        DayBand::Five => 0.0,
        DayBand::Six => component6 * weeks,
        DayBand::Seven => (component6 + component7) * weeks,
    }
}

/// Display-only reference price before reduction and markup.
///
/// Returns 0 when the markup coefficient is zero.
pub fn anchored_base(
    price_after_day_discount: f64,
    total_bag_fee: f64,
    reduction_percent: f64,
    markup_percent: f64,
) -> f64 {
    let reduction_coeff = 1.0 - fraction(reduction_percent);
    let markup_coeff = 1.0 - fraction(markup_percent);
    if markup_coeff == 0.0 {
        return 0.0;
    }
    (price_after_day_discount * reduction_coeff + total_bag_fee) / markup_coeff
}

/// Promo discount for a plan. Zero unless the promo value is positive.
pub fn promo_discount_amount(
    config: &PlanConfiguration,
    daily_meal_cost: f64,
    daily_snack_cost: f64,
    price_after_week_discount: f64,
) -> f64 {
    let promo = &config.promo;
    if promo.value <= 0.0 {
        return 0.0;
    }

    let plan_days = config.total_days() as f64;
    let base = match promo.scope {
        PromoScope::Meals => daily_meal_cost * plan_days,
        PromoScope::Snacks => daily_snack_cost * plan_days,
        PromoScope::Total => price_after_week_discount,
    };

    match promo.kind {
        PromoKind::Percentage => base * fraction(promo.value),
        PromoKind::Flat => promo.value,
    }
}

/// Price a plan against a pricing table.
///
/// Never fails: unknown tiers, slots, ordinals and bands all price at zero.
pub fn compute_breakdown(config: &PlanConfiguration, table: &PricingTable) -> PriceBreakdown {
    let days = config.day_count.days() as f64;
    let weeks = config.week_count.weeks() as f64;

    // Daily costs
    let meal_costs = meal_slot_costs(&config.meal_calorie_tiers, table);
    let daily_meal_cost: f64 = meal_costs.iter().sum();
    let daily_base_meal_cost = base_meal_cost(&config.meal_calorie_tiers, table);
    let daily_snack_cost = snack_cost(config.snack_count, table, true);
    let daily_base_snack_cost = snack_cost(config.snack_count, table, false);

    let total_daily = daily_meal_cost + daily_snack_cost;
    let total_base_daily = daily_base_meal_cost + daily_base_snack_cost;
    let subtotal_plan = total_daily * days * weeks;
    let subtotal_base_plan = total_base_daily * days * weeks;

    // Day discount, then surcharge, then week discount on the surcharged price
    let day_discount_amount =
        day_discount_amount(total_daily, config.day_count, config.week_count, table);
    let price_after_day_discount = subtotal_plan - day_discount_amount;

    let price_after_surcharge =
        price_after_day_discount * (1.0 + fraction(config.surcharge_percent));
    let surcharge_amount = price_after_surcharge - price_after_day_discount;

    let week_discount_amount =
        price_after_surcharge * fraction(table.week_discount(config.week_count));
    let price_after_week_discount = price_after_surcharge - week_discount_amount;

    let total_bag_fee = days * weeks * table.bag_fee;

    let anchored_base = anchored_base(
        price_after_day_discount,
        total_bag_fee,
        config.reduction_percent,
        config.markup_percent,
    );
    let savings = anchored_base - price_after_week_discount - total_bag_fee;

    let promo_discount_amount = promo_discount_amount(
        config,
        daily_meal_cost,
        daily_snack_cost,
        price_after_week_discount,
    );

    let grand_total = price_after_week_discount - promo_discount_amount + total_bag_fee;

    tracing::debug!(
        plan = %config.summary(),
        total_daily,
        day_discount_amount,
        week_discount_amount,
        promo_discount_amount,
        grand_total,
        "priced plan"
    );

    PriceBreakdown {
        meal_costs,
        daily_meal_cost,
        daily_base_meal_cost,
        daily_snack_cost,
        daily_base_snack_cost,
        total_daily,
        total_base_daily,
        subtotal_plan,
        subtotal_base_plan,
        day_discount_amount,
        price_after_day_discount,
        surcharge_amount,
        price_after_surcharge,
        week_discount_amount,
        price_after_week_discount,
        total_bag_fee,
        anchored_base,
        savings,
        promo_discount_amount,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Promo;

    fn plan(meals: &[u32], snacks: u8, days: DayBand, weeks: WeekBand) -> PlanConfiguration {
        PlanConfiguration::with_meals(meals, snacks, days, weeks)
    }

    #[test]
    fn test_meal_slot_costs_apply_slot_discount() {
        let table = PricingTable::standard();
        let costs = meal_slot_costs(&[800, 800, 500, 0, 0], &table);
        assert!((costs[0] - 63.0).abs() < 1e-9);
        assert!((costs[1] - 50.4).abs() < 1e-9); // 20% off
        assert!((costs[2] - 37.1).abs() < 1e-9); // 30% off
        assert_eq!(costs[3], 0.0);
    }

    #[test]
    fn test_unknown_tier_prices_at_zero() {
        let table = PricingTable::standard();
        let costs = meal_slot_costs(&[450, 0, 0, 0, 0], &table);
        assert_eq!(costs[0], 0.0);
    }

    #[test]
    fn test_snack_cost() {
        let table = PricingTable::standard();
        // 12 * 0.8 + 12 * 0.7
        assert!((snack_cost(2, &table, true) - 18.0).abs() < 1e-9);
        assert!((snack_cost(2, &table, false) - 24.0).abs() < 1e-9);
        assert_eq!(snack_cost(0, &table, true), 0.0);
    }

    #[test]
    fn test_day_discount_tiers_accumulate() {
        let table = PricingTable::standard();
        let six = day_discount_amount(100.0, DayBand::Six, WeekBand::Two, &table);
        let seven = day_discount_amount(100.0, DayBand::Seven, WeekBand::Two, &table);
        assert!((six - 120.0).abs() < 1e-9);
        assert!((seven - 240.0).abs() < 1e-9);
        assert_eq!(day_discount_amount(100.0, DayBand::Five, WeekBand::Two, &table), 0.0);
    }

    #[test]
    fn test_anchored_base_guards_full_markup() {
        assert_eq!(anchored_base(1000.0, 10.0, 12.5, 100.0), 0.0);
        // (1000 * 0.875 + 10) / 0.75
        assert!((anchored_base(1000.0, 10.0, 12.5, 25.0) - 1180.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_surcharge_is_a_discount() {
        let table = PricingTable::standard();
        let mut config = plan(&[800], 0, DayBand::Five, WeekBand::One);
        config.surcharge_percent = -10.0;
        let breakdown = compute_breakdown(&config, &table);
        // 63 * 5 = 315, -10%
        assert!((breakdown.surcharge_amount + 31.5).abs() < 1e-9);
        assert!((breakdown.price_after_surcharge - 283.5).abs() < 1e-9);
    }

    #[test]
    fn test_promo_scopes() {
        let table = PricingTable::standard();
        let mut config = plan(&[800, 800], 1, DayBand::Five, WeekBand::One);

        config.promo = Promo {
            kind: PromoKind::Percentage,
            value: 10.0,
            scope: PromoScope::Snacks,
        };
        let breakdown = compute_breakdown(&config, &table);
        // snacks: 9.6 * 5 = 48
        assert!((breakdown.promo_discount_amount - 4.8).abs() < 1e-9);

        config.promo.scope = PromoScope::Meals;
        let breakdown = compute_breakdown(&config, &table);
        // meals: 113.4 * 5 = 567
        assert!((breakdown.promo_discount_amount - 56.7).abs() < 1e-9);

        config.promo = Promo {
            kind: PromoKind::Flat,
            value: 25.0,
            scope: PromoScope::Meals,
        };
        let breakdown = compute_breakdown(&config, &table);
        assert!((breakdown.promo_discount_amount - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_plan_is_bag_fee_only() {
        let table = PricingTable::standard();
        let config = plan(&[], 0, DayBand::Five, WeekBand::One);
        let breakdown = compute_breakdown(&config, &table);
        assert_eq!(breakdown.price_after_week_discount, 0.0);
        assert!((breakdown.grand_total - 3.0).abs() < 1e-9);
    }
}
