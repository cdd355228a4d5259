use crate::models::{AdjustmentResult, AdjustmentStatus, PlanConfiguration, PriceBreakdown};
use crate::pricing::constants::SETTLEMENT_EPSILON;

/// Classify a signed settlement amount.
pub fn settlement_status(final_adjustment: f64) -> AdjustmentStatus {
    if final_adjustment.abs() < SETTLEMENT_EPSILON {
        AdjustmentStatus::NoChange
    } else if final_adjustment > 0.0 {
        AdjustmentStatus::TopUpRequired(final_adjustment)
    } else {
        AdjustmentStatus::CreditDue(final_adjustment.abs())
    }
}

/// Settle a mid-subscription plan change.
///
/// Both plans are averaged per day over the old plan's length, so the
/// difference reads as "cost per day already committed to". The promo
/// difference is averaged the same way and netted out. Bag fees are left
/// out entirely. Returns a neutral result when the old plan has no days.
pub fn compute_adjustment(
    old_breakdown: &PriceBreakdown,
    new_breakdown: &PriceBreakdown,
    old_config: &PlanConfiguration,
    new_config: &PlanConfiguration,
    days_consumed: u32,
) -> AdjustmentResult {
    let total_days_old = old_config.total_days();
    if total_days_old == 0 {
        return AdjustmentResult::neutral();
    }

    let remaining_days = total_days_old.saturating_sub(days_consumed);
    let plan_days = total_days_old as f64;
    let remaining = remaining_days as f64;

    let old_daily_avg = old_breakdown.price_after_week_discount / plan_days;
    let new_daily_avg = new_breakdown.price_after_week_discount / plan_days;
    let old_promo_daily = old_breakdown.promo_discount_amount / plan_days;
    let new_promo_daily = new_breakdown.promo_discount_amount / plan_days;

    let price_delta = new_daily_avg - old_daily_avg;
    let promo_delta = new_promo_daily - old_promo_daily;

    let daily_difference = price_delta - promo_delta;
    let subtotal_adjustment = price_delta * remaining;
    let promo_adjustment = promo_delta * remaining;
    let final_adjustment = daily_difference * remaining;

    let status = settlement_status(final_adjustment);

    tracing::debug!(
        from = %old_config.summary(),
        to = %new_config.summary(),
        days_consumed,
        remaining_days,
        daily_difference,
        final_adjustment,
        "computed plan adjustment"
    );

    AdjustmentResult {
        remaining_days,
        new_plan_days: new_config.total_days(),
        daily_difference,
        subtotal_adjustment,
        promo_adjustment,
        final_adjustment,
        status,
    }
}


#[cfg(test)]
mod tests {
    use super::alternative_strategies::*;
    use super::*;
    use crate::models::{DayBand, PricingTable, WeekBand};
    use crate::pricing::calculations::compute_breakdown;

    fn priced(config: &PlanConfiguration, table: &PricingTable) -> PriceBreakdown {
        compute_breakdown(config, table)
    }

    #[test]
    fn test_settlement_status() {
        assert_eq!(settlement_status(10.0), AdjustmentStatus::TopUpRequired(10.0));
        assert_eq!(settlement_status(-4.5), AdjustmentStatus::CreditDue(4.5));
        assert_eq!(settlement_status(0.0), AdjustmentStatus::NoChange);
        assert_eq!(settlement_status(0.001), AdjustmentStatus::NoChange);
    }

    #[test]
    fn test_zero_priced_plans_settle_to_nothing() {
        let config = PlanConfiguration::default();
        let breakdown = PriceBreakdown::default();
        let result = compute_adjustment(&breakdown, &breakdown, &config, &config, 0);
        assert_eq!(result.final_adjustment, 0.0);
        assert_eq!(result.status, AdjustmentStatus::NoChange);
    }

    #[test]
    fn test_upgrade_requires_top_up() {
        let table = PricingTable::standard();
        let old = PlanConfiguration::default();
        let mut new = old.clone();
        new.meal_calorie_tiers[2] = 500;

        let result =
            compute_adjustment(&priced(&old, &table), &priced(&new, &table), &old, &new, 10);

        // Extra slot: 53 * 0.7 = 37.1 per day, less 7.5% for four weeks
        let expected_daily = 37.1 * 0.925;
        assert_eq!(result.remaining_days, 10);
        assert!((result.daily_difference - expected_daily).abs() < 1e-9);
        assert!((result.final_adjustment - expected_daily * 10.0).abs() < 1e-9);
        assert!(matches!(result.status, AdjustmentStatus::TopUpRequired(_)));
    }

    #[test]
    fn test_strategies_diverge_on_six_day_plans() {
        let table = PricingTable::standard();
        let old = PlanConfiguration::with_meals(&[800, 800], 1, DayBand::Six, WeekBand::Four);
        let mut new = old.clone();
        new.meal_calorie_tiers[2] = 500;

        let old_b = priced(&old, &table);
        let new_b = priced(&new, &table);

        let canonical = compute_adjustment(&old_b, &new_b, &old, &new, 4).final_adjustment;
        // 37.1 per day, 6-day band keeps 90% over the plan, 4-week band keeps 92.5%
        let expected = 37.1 * 0.9 * 0.925 * 20.0;
        assert!((canonical - expected).abs() < 1e-9);

        // Fixed 30% and multiplicative 60% day discount give a much smaller figure
        let fitted = live_site_fit(&old, &new, &table, 4);
        assert!((fitted - (53.0_f64 * 0.7 * 0.4 * 0.925 * 20.0).round()).abs() < 1e-9);
        assert!((canonical - fitted).abs() > 100.0);

        // Daily subtotal ignores the band discounts entirely
        let subtotal = daily_subtotal(&old_b, &new_b, &old, 4);
        assert!((subtotal - 37.1 * 20.0).abs() < 1e-9);
        assert!(subtotal > canonical);
    }

    #[test]
    fn test_grand_total_rate_includes_bag_fee_and_new_length() {
        let table = PricingTable::standard();
        let old = PlanConfiguration::default();
        let mut new = old.clone();
        new.week_count = WeekBand::Two;

        let old_b = priced(&old, &table);
        let new_b = priced(&new, &table);

        // Same daily menu, shorter plan: canonical settles on the price change only
        let canonical = compute_adjustment(&old_b, &new_b, &old, &new, 0);
        let rate_based = grand_total_rate(&old_b, &new_b, &old, &new, 0);
        assert!(canonical.final_adjustment < 0.0);
        assert!((canonical.final_adjustment - rate_based).abs() > 1.0);
    }
}
