pub mod adjustment;
pub mod calculations;
pub mod constants;

pub use adjustment::{compute_adjustment, settlement_status};
pub use calculations::{
    anchored_base, base_meal_cost, compute_breakdown, day_discount_amount, fraction,
    meal_slot_costs, promo_discount_amount, snack_cost,
};
pub use constants::*;
