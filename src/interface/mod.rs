pub mod prompts;
pub mod render;

pub use prompts::{
    collect_plan, prompt_days, prompt_days_consumed, prompt_label, prompt_meals, prompt_promo,
    prompt_snacks, prompt_weeks, prompt_yes_no,
};
pub use render::{display_adjustment, display_breakdown, display_snapshots, display_table};
