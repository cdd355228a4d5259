use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{PricingTable, SavedPlanSnapshot};

/// Load a pricing table from a JSON file and validate it.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<PricingTable> {
    let content = fs::read_to_string(path.as_ref())?;
    let table: PricingTable = serde_json::from_str(&content)?;
    table.validate()?;
    tracing::debug!(path = %path.as_ref().display(), "loaded pricing table");
    Ok(table)
}

/// Save a pricing table as pretty JSON.
pub fn save_table<P: AsRef<Path>>(path: P, table: &PricingTable) -> Result<()> {
    let json = serde_json::to_string_pretty(table)?;
    fs::write(path.as_ref(), json)?;
    tracing::info!(path = %path.as_ref().display(), "wrote pricing table");
    Ok(())
}

/// Load saved plans from a JSON file.
///
/// A missing or blank file reads as an empty history. Duplicate ids keep the
/// first occurrence (newest entries are stored first).
pub fn load_snapshots<P: AsRef<Path>>(path: P) -> Result<Vec<SavedPlanSnapshot>> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(path = %path.display(), "no saved plans file, starting empty");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let snapshots: Vec<SavedPlanSnapshot> = serde_json::from_str(&content)?;

    let mut seen = HashSet::new();
    Ok(snapshots
        .into_iter()
        .filter(|snapshot| seen.insert(snapshot.id))
        .collect())
}

/// Save plans to a JSON file, replacing its contents.
pub fn save_snapshots<P: AsRef<Path>>(path: P, snapshots: &[SavedPlanSnapshot]) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshots)?;
    fs::write(path.as_ref(), json)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        count = snapshots.len(),
        "wrote saved plans"
    );
    Ok(())
}
