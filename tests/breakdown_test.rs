#[macro_use]
extern crate assert_float_eq;

use meal_plan_pricer_rs::models::{
    DayBand, PlanConfiguration, PricingTable, Promo, PromoKind, PromoScope, WeekBand,
};
use meal_plan_pricer_rs::pricing::compute_breakdown;

fn scenario_plan(days: DayBand, weeks: WeekBand) -> PlanConfiguration {
    PlanConfiguration::with_meals(&[800, 800, 0, 0, 0], 1, days, weeks)
}

#[test]
fn test_scenario_five_days_four_weeks() {
    let table = PricingTable::standard();
    let b = compute_breakdown(&scenario_plan(DayBand::Five, WeekBand::Four), &table);

    assert_float_absolute_eq!(b.daily_meal_cost, 113.4, 1e-9);
    assert_float_absolute_eq!(b.daily_snack_cost, 9.6, 1e-9);
    assert_float_absolute_eq!(b.total_daily, 123.0, 1e-9);
    assert_float_absolute_eq!(b.subtotal_plan, 2460.0, 1e-9);
    assert_eq!(b.day_discount_amount, 0.0);
    assert_float_absolute_eq!(b.price_after_week_discount, 2275.5, 1e-9);
    assert_float_absolute_eq!(b.total_bag_fee, 12.0, 1e-9);
    assert_float_absolute_eq!(b.grand_total, 2287.5, 1e-9);
}

#[test]
fn test_scenario_seven_days_stacks_day_discounts() {
    let table = PricingTable::standard();
    let b = compute_breakdown(&scenario_plan(DayBand::Seven, WeekBand::Four), &table);

    assert_float_absolute_eq!(b.total_daily, 123.0, 1e-9);
    // (73.8 + 73.8) * 4
    assert_float_absolute_eq!(b.day_discount_amount, 590.4, 1e-9);
    assert_float_absolute_eq!(b.price_after_day_discount, 123.0 * 28.0 - 590.4, 1e-9);
}

#[test]
fn test_six_day_discount_uses_only_six_day_component() {
    let table = PricingTable::standard();
    let b = compute_breakdown(&scenario_plan(DayBand::Six, WeekBand::Two), &table);
    assert_float_absolute_eq!(b.day_discount_amount, 73.8 * 2.0, 1e-9);
}

#[test]
fn test_five_day_band_never_discounts() {
    let mut table = PricingTable::standard();
    table.day_discounts.insert(DayBand::Five, 90.0);
    table.day_discounts.insert(DayBand::Six, 90.0);

    for weeks in WeekBand::ALL {
        let b = compute_breakdown(&scenario_plan(DayBand::Five, weeks), &table);
        assert_eq!(b.day_discount_amount, 0.0);
    }
}

#[test]
fn test_without_promo_grand_total_is_price_plus_bag_fee() {
    let table = PricingTable::standard();
    for days in DayBand::ALL {
        for weeks in WeekBand::ALL {
            let mut plan = scenario_plan(days, weeks);
            plan.surcharge_percent = 8.0;
            let b = compute_breakdown(&plan, &table);
            assert_eq!(b.grand_total, b.price_after_week_discount + b.total_bag_fee);
        }
    }
}

#[test]
fn test_bag_fee_is_flat_per_day() {
    let table = PricingTable::standard();
    for days in DayBand::ALL {
        for weeks in WeekBand::ALL {
            let mut plan = scenario_plan(days, weeks);
            plan.promo = Promo {
                kind: PromoKind::Percentage,
                value: 50.0,
                scope: PromoScope::Total,
            };
            let b = compute_breakdown(&plan, &table);
            let expected = (days.days() * weeks.weeks()) as f64 * table.bag_fee;
            assert_eq!(b.total_bag_fee, expected);
        }
    }
}

#[test]
fn test_total_promo_applies_after_week_discount() {
    let table = PricingTable::standard();
    let mut plan = scenario_plan(DayBand::Five, WeekBand::Four);
    plan.promo = Promo {
        kind: PromoKind::Percentage,
        value: 10.0,
        scope: PromoScope::Total,
    };

    let b = compute_breakdown(&plan, &table);
    assert_float_absolute_eq!(b.promo_discount_amount, 227.55, 1e-9);
    assert_float_absolute_eq!(b.grand_total, 2275.5 - 227.55 + 12.0, 1e-9);
}

#[test]
fn test_surcharge_applies_before_week_discount() {
    let table = PricingTable::standard();
    let mut plan = scenario_plan(DayBand::Five, WeekBand::Four);
    plan.surcharge_percent = 10.0;

    let b = compute_breakdown(&plan, &table);
    assert_float_absolute_eq!(b.surcharge_amount, 246.0, 1e-9);
    assert_float_absolute_eq!(b.week_discount_amount, 2706.0 * 0.075, 1e-9);
    assert_float_absolute_eq!(b.price_after_week_discount, 2706.0 * 0.925, 1e-9);
}

#[test]
fn test_anchored_base_and_savings() {
    let table = PricingTable::standard();
    let plan = scenario_plan(DayBand::Five, WeekBand::Four);
    let b = compute_breakdown(&plan, &table);

    // (2460 * 0.875 + 12) / 0.75
    assert_float_absolute_eq!(b.anchored_base, 2886.0, 1e-9);
    assert_float_absolute_eq!(b.savings, 2886.0 - 2275.5 - 12.0, 1e-9);
}

#[test]
fn test_base_costs_ignore_slot_and_snack_discounts() {
    let table = PricingTable::standard();
    let plan = PlanConfiguration::with_meals(&[800, 600, 500], 3, DayBand::Five, WeekBand::One);
    let b = compute_breakdown(&plan, &table);

    assert_float_absolute_eq!(b.daily_base_meal_cost, 63.0 + 56.0 + 53.0, 1e-9);
    assert_float_absolute_eq!(b.daily_base_snack_cost, 36.0, 1e-9);
    assert_float_absolute_eq!(b.total_base_daily, 208.0, 1e-9);
    assert_float_absolute_eq!(b.subtotal_base_plan, 1040.0, 1e-9);
}

#[test]
fn test_sparse_table_prices_missing_entries_at_zero() {
    let table: PricingTable = serde_json::from_str(r#"{"mealPrices": {"800": 63}}"#).unwrap();
    let plan = PlanConfiguration::with_meals(&[800, 800], 2, DayBand::Seven, WeekBand::Four);
    let b = compute_breakdown(&plan, &table);

    assert_float_absolute_eq!(b.daily_meal_cost, 126.0, 1e-9);
    assert_eq!(b.daily_snack_cost, 0.0);
    assert_eq!(b.day_discount_amount, 0.0);
    assert_eq!(b.week_discount_amount, 0.0);
    assert_eq!(b.total_bag_fee, 0.0);
}

#[test]
fn test_legacy_table() {
    let table = PricingTable::legacy();
    let plan = scenario_plan(DayBand::Seven, WeekBand::Four);
    let b = compute_breakdown(&plan, &table);

    // 54 + 54 * 0.93 + 10
    assert_float_absolute_eq!(b.total_daily, 114.22, 1e-9);
    assert_eq!(b.day_discount_amount, 0.0);
    assert_float_absolute_eq!(b.grand_total, 114.22 * 28.0, 1e-9);
}
