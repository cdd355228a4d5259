pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod pricing;
pub mod ratesheet;
pub mod state;

pub use error::{PriceError, Result};
pub use models::{AdjustmentResult, PlanConfiguration, PriceBreakdown, PricingTable};
pub use pricing::{compute_adjustment, compute_breakdown};
