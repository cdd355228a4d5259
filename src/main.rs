use std::path::Path;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meal_plan_pricer_rs::cli::{Cli, Command, PlanArgs};
use meal_plan_pricer_rs::error::Result;
use meal_plan_pricer_rs::interface::{
    collect_plan, display_adjustment, display_breakdown, display_snapshots, display_table,
    prompt_days_consumed, prompt_label, prompt_yes_no,
};
use meal_plan_pricer_rs::models::{PlanConfiguration, PriceBreakdown, PricingTable};
use meal_plan_pricer_rs::pricing::{SETTLEMENT_EPSILON, compute_adjustment, compute_breakdown};
use meal_plan_pricer_rs::state::{
    SnapshotStore, load_snapshots, load_table, save_snapshots, save_table,
};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "meal_plan_pricer_rs=debug"
    } else {
        "meal_plan_pricer_rs=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let table = active_table(&cli)?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Quote { plan } => cmd_quote(&cli.history, table, &plan),
        Command::Save { plan, label } => cmd_save(&cli.history, table, &plan, label),
        Command::History => cmd_history(&cli.history),
        Command::Show { plan } => cmd_show(&cli.history, &plan),
        Command::Remove { plan } => cmd_remove(&cli.history, &plan),
        Command::Adjust {
            from,
            days_consumed,
            plan,
        } => cmd_adjust(&cli.history, &from, days_consumed, &plan),
        Command::Table { write } => match write {
            Some(path) => {
                save_table(&path, &table)?;
                println!("Pricing table written to {}.", path.display());
                Ok(())
            }
            None => {
                display_table(&table);
                Ok(())
            }
        },
    }
}

/// Resolve the pricing table from the global flags.
fn active_table(cli: &Cli) -> Result<PricingTable> {
    let table = match (&cli.table, cli.legacy_pricing) {
        (Some(path), _) => load_table(path)?,
        (None, true) => PricingTable::legacy(),
        (None, false) => PricingTable::standard(),
    };

    if cli.no_snack_discounts {
        Ok(table.without_snack_discounts())
    } else {
        Ok(table)
    }
}

/// Build the plan from flags, optionally refined through prompts.
fn plan_from_args(table: &PricingTable, plan: &PlanArgs) -> Result<PlanConfiguration> {
    let config = plan.to_config()?;
    if plan.interactive {
        collect_plan(table, &config)
    } else {
        Ok(config)
    }
}

/// Price a plan and display the breakdown.
fn cmd_quote(history: &Path, table: PricingTable, plan: &PlanArgs) -> Result<()> {
    let config = plan_from_args(&table, plan)?;
    let breakdown = compute_breakdown(&config, &table);
    display_breakdown(&config, &breakdown);

    if plan.interactive && prompt_yes_no("Save this plan?", false)? {
        let label = prompt_label()?;
        store_plan(history, Some(&label), config, table, &breakdown)?;
    }

    Ok(())
}

/// Price a plan and append it to the saved history.
fn cmd_save(
    history: &Path,
    table: PricingTable,
    plan: &PlanArgs,
    label: Option<String>,
) -> Result<()> {
    let config = plan_from_args(&table, plan)?;
    let breakdown = compute_breakdown(&config, &table);
    display_breakdown(&config, &breakdown);

    let label = match label {
        Some(label) => Some(label),
        None if plan.interactive => Some(prompt_label()?),
        None => None,
    };

    store_plan(history, label.as_deref(), config, table, &breakdown)
}

fn store_plan(
    history: &Path,
    label: Option<&str>,
    config: PlanConfiguration,
    table: PricingTable,
    breakdown: &PriceBreakdown,
) -> Result<()> {
    let mut store = SnapshotStore::new(load_snapshots(history)?);
    let id = store.save(label, config, table, breakdown, Utc::now());
    save_snapshots(history, store.all())?;

    println!("Saved plan {} ({} plans in history).", id, store.len());
    Ok(())
}

/// List saved plans.
fn cmd_history(history: &Path) -> Result<()> {
    let store = SnapshotStore::new(load_snapshots(history)?);
    display_snapshots(store.all());
    Ok(())
}

/// Restore a saved plan and re-price it with its stored table.
fn cmd_show(history: &Path, query: &str) -> Result<()> {
    let store = SnapshotStore::new(load_snapshots(history)?);
    let snapshot = store.find(query)?;

    println!(
        "{} (saved {})",
        snapshot.label,
        snapshot.saved_at.format("%Y-%m-%d %H:%M")
    );
    let breakdown = snapshot.recompute();
    display_breakdown(&snapshot.config, &breakdown);

    if (breakdown.grand_total - snapshot.grand_total).abs() >= SETTLEMENT_EPSILON {
        println!(
            "Note: saved total was {:.2}, recomputed total is {:.2}.",
            snapshot.grand_total, breakdown.grand_total
        );
    }
    Ok(())
}

/// Delete a saved plan.
fn cmd_remove(history: &Path, query: &str) -> Result<()> {
    let mut store = SnapshotStore::new(load_snapshots(history)?);
    let removed = store.remove(query)?;
    save_snapshots(history, store.all())?;
    println!("Removed '{}'.", removed.label);
    Ok(())
}

/// Settle a change from a saved plan to the plan given by flags or prompts.
///
/// The new plan starts as a copy of the saved one with the given flags
/// applied. Both plans are priced with the saved plan's table.
fn cmd_adjust(
    history: &Path,
    from: &str,
    days_consumed: Option<u32>,
    plan: &PlanArgs,
) -> Result<()> {
    let store = SnapshotStore::new(load_snapshots(history)?);
    let snapshot = store.find(from)?;
    let table = &snapshot.table;
    let old_config = &snapshot.config;

    let seeded = plan.apply_to(old_config)?;
    let new_config = if plan.interactive {
        collect_plan(table, &seeded)?
    } else {
        seeded
    };

    let days_consumed = match days_consumed {
        Some(days) => days,
        None => prompt_days_consumed(old_config.total_days())?,
    };

    let old_breakdown = compute_breakdown(old_config, table);
    let new_breakdown = compute_breakdown(&new_config, table);
    let result = compute_adjustment(
        &old_breakdown,
        &new_breakdown,
        old_config,
        &new_config,
        days_consumed,
    );

    display_adjustment(old_config, &new_config, days_consumed, &result);
    Ok(())
}
