/// Number of meal slots in a day's plan.
pub const MEAL_SLOTS: usize = 5;

/// Maximum snacks per day.
pub const MAX_SNACKS: u8 = 5;

/// Calorie tier whose unit price is also the snack price.
pub const SNACK_CALORIE_TIER: u32 = 200;

/// Calorie tiers offered for meal slots (0 = empty slot).
pub const MEAL_TIER_CHOICES: [u32; 6] = [0, 400, 500, 600, 700, 800];

/// Display currency for all amounts.
pub const CURRENCY: &str = "AED";

/// Adjustments smaller than half a minor unit are reported as "no change".
pub const SETTLEMENT_EPSILON: f64 = 0.005;

// ─────────────────────────────────────────────────────────────────────────────
// Standard pricing table
// ─────────────────────────────────────────────────────────────────────────────

/// Unit price by calorie tier.
pub const STANDARD_MEAL_PRICES: [(u32, f64); 6] = [
    (200, 12.0),
    (400, 49.0),
    (500, 53.0),
    (600, 56.0),
    (700, 60.0),
    (800, 63.0),
];

/// Percent off per meal slot (slot 0 = first meal).
pub const STANDARD_MEAL_DISCOUNTS: [f64; MEAL_SLOTS] = [0.0, 20.0, 30.0, 60.0, 60.0];

/// Percent off per snack ordinal (1-based).
pub const STANDARD_SNACK_DISCOUNTS: [(u8, f64); 5] =
    [(1, 20.0), (2, 30.0), (3, 40.0), (4, 40.0), (5, 40.0)];

/// Percent off by day band (5, 6, 7).
pub const STANDARD_DAY_DISCOUNTS: [(u32, f64); 3] = [(5, 0.0), (6, 60.0), (7, 60.0)];

/// Percent off by week band (1, 2, 4).
pub const STANDARD_WEEK_DISCOUNTS: [(u32, f64); 3] = [(1, 0.0), (2, 0.0), (4, 7.5)];

pub const STANDARD_BAG_FEE: f64 = 0.6;

// ─────────────────────────────────────────────────────────────────────────────
// Legacy pricing table (before tiered day/week/snack discounts)
// ─────────────────────────────────────────────────────────────────────────────

pub const LEGACY_MEAL_PRICES: [(u32, f64); 6] = [
    (200, 10.0),
    (400, 42.0),
    (500, 45.0),
    (600, 48.0),
    (700, 51.0),
    (800, 54.0),
];

pub const LEGACY_MEAL_DISCOUNTS: [f64; MEAL_SLOTS] = [0.0, 7.0, 22.0, 27.0, 32.0];

pub const LEGACY_BAG_FEE: f64 = 0.0;

// ─────────────────────────────────────────────────────────────────────────────
// Plan form defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_MEALS: [u32; MEAL_SLOTS] = [800, 800, 0, 0, 0];
pub const DEFAULT_SNACKS: u8 = 1;
pub const DEFAULT_REDUCTION_PERCENT: f64 = 12.5;
pub const DEFAULT_MARKUP_PERCENT: f64 = 25.0;
