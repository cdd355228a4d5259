pub mod band;
pub mod breakdown;
pub mod plan;
pub mod snapshot;
pub mod table;

pub use band::{DayBand, WeekBand, plan_days};
pub use breakdown::{AdjustmentResult, AdjustmentStatus, PriceBreakdown};
pub use plan::{PlanConfiguration, Promo, PromoKind, PromoScope, pad_meal_tiers};
pub use snapshot::SavedPlanSnapshot;
pub use table::PricingTable;
