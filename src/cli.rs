use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::models::{DayBand, PlanConfiguration, PromoKind, PromoScope, WeekBand, pad_meal_tiers};

/// Meal plan pricer: prices meal subscriptions and settles mid-plan changes.
#[derive(Parser, Debug)]
#[command(name = "meal_plan_pricer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Pricing table JSON file (built-in standard table when omitted).
    #[arg(short, long, global = true)]
    pub table: Option<PathBuf>,

    /// Use the legacy price list instead of the standard one.
    #[arg(long, global = true, conflicts_with = "table")]
    pub legacy_pricing: bool,

    /// Zero every snack discount in the active table.
    #[arg(long, global = true)]
    pub no_snack_discounts: bool,

    /// Saved plans JSON file.
    #[arg(long, global = true, default_value = "plan_history.json")]
    pub history: PathBuf,

    /// Log calculation details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price a plan and show the itemized breakdown.
    Quote {
        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Price a plan and save it to the history.
    Save {
        #[command(flatten)]
        plan: PlanArgs,

        /// Label for the saved plan (defaults to "Plan N").
        #[arg(short, long)]
        label: Option<String>,
    },

    /// List saved plans.
    History,

    /// Restore a saved plan (by id or label) and show its breakdown.
    Show {
        /// Saved plan id or label.
        plan: String,
    },

    /// Delete a saved plan (by id or label).
    Remove {
        /// Saved plan id or label.
        plan: String,
    },

    /// Settle a change from a saved plan to a new configuration.
    Adjust {
        /// Saved plan id or label to change from.
        #[arg(long)]
        from: String,

        /// Days of the saved plan already delivered (prompted when omitted).
        #[arg(long)]
        days_consumed: Option<u32>,

        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Show the active pricing table, or write it as JSON for editing.
    Table {
        /// Write the table to this file instead of printing it.
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Quote {
            plan: PlanArgs::default(),
        }
    }
}

/// Plan configuration flags.
///
/// Every flag is optional: flags that are given override a base plan, the
/// rest keep the base plan's values.
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Calorie tier per meal slot, comma-separated (0 = no meal).
    #[arg(long, value_delimiter = ',')]
    pub meals: Option<Vec<u32>>,

    /// Snacks per day (0-5).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
    pub snacks: Option<u8>,

    /// Delivery days per week (5, 6 or 7).
    #[arg(long)]
    pub days: Option<u32>,

    /// Plan length in weeks (1, 2 or 4).
    #[arg(long)]
    pub weeks: Option<u32>,

    /// Surcharge percent; negative values discount.
    #[arg(long, allow_negative_numbers = true)]
    pub surcharge: Option<f64>,

    /// Reduction percent for the reference price.
    #[arg(long)]
    pub reduction: Option<f64>,

    /// Markup percent for the reference price.
    #[arg(long)]
    pub markup: Option<f64>,

    /// Promo type.
    #[arg(long, value_enum)]
    pub promo_type: Option<PromoKind>,

    /// Promo value (percent or flat amount; 0 = no promo).
    #[arg(long)]
    pub promo_value: Option<f64>,

    /// What the promo applies to.
    #[arg(long, value_enum)]
    pub promo_scope: Option<PromoScope>,

    /// Collect the plan with interactive prompts, starting from these flags.
    #[arg(short, long)]
    pub interactive: bool,
}

impl PlanArgs {
    /// Convert flags to a validated plan, filling gaps from the default plan.
    pub fn to_config(&self) -> Result<PlanConfiguration> {
        self.apply_to(&PlanConfiguration::default())
    }

    /// Override `base` with the flags that were given and validate the result.
    pub fn apply_to(&self, base: &PlanConfiguration) -> Result<PlanConfiguration> {
        let mut config = base.clone();

        if let Some(meals) = &self.meals {
            config.meal_calorie_tiers = pad_meal_tiers(meals);
        }
        if let Some(snacks) = self.snacks {
            config.snack_count = snacks;
        }
        if let Some(days) = self.days {
            config.day_count = DayBand::try_from(days)?;
        }
        if let Some(weeks) = self.weeks {
            config.week_count = WeekBand::try_from(weeks)?;
        }
        if let Some(surcharge) = self.surcharge {
            config.surcharge_percent = surcharge;
        }
        if let Some(reduction) = self.reduction {
            config.reduction_percent = reduction;
        }
        if let Some(markup) = self.markup {
            config.markup_percent = markup;
        }
        if let Some(kind) = self.promo_type {
            config.promo.kind = kind;
        }
        if let Some(value) = self.promo_value {
            config.promo.value = value;
        }
        if let Some(scope) = self.promo_scope {
            config.promo.scope = scope;
        }

        config.validate()?;
        Ok(config)
    }
}
