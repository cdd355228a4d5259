pub mod grid;
pub mod output;

pub use grid::{RateSheetConfig, RateSheetRow, cheapest_per_day, sweep};
pub use output::{print_cheapest, write_csv, write_summary_json};
