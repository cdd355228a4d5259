use chrono::{DateTime, Utc};
use strsim::jaro_winkler;

use crate::error::{PriceError, Result};
use crate::models::{PlanConfiguration, PriceBreakdown, PricingTable, SavedPlanSnapshot};

/// Minimum similarity for a fuzzy label match.
const LABEL_MATCH_THRESHOLD: f64 = 0.85;

/// Holds saved plans, newest first.
pub struct SnapshotStore {
    snapshots: Vec<SavedPlanSnapshot>,
}

impl SnapshotStore {
    /// Create a store from previously saved plans.
    pub fn new(snapshots: Vec<SavedPlanSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Save a priced plan. Returns the new snapshot's id.
    ///
    /// The id is the save time in milliseconds, bumped past any id already in use.
    /// An empty label becomes "Plan N".
    pub fn save(
        &mut self,
        label: Option<&str>,
        config: PlanConfiguration,
        table: PricingTable,
        breakdown: &PriceBreakdown,
        saved_at: DateTime<Utc>,
    ) -> u64 {
        let mut id = saved_at.timestamp_millis().max(0) as u64;
        while self.snapshots.iter().any(|s| s.id == id) {
            id += 1;
        }

        let label = match label.map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("Plan {}", self.snapshots.len() + 1),
        };

        tracing::info!(id, label = %label, grand_total = breakdown.grand_total, "saved plan");
        let snapshot = SavedPlanSnapshot::new(id, label, saved_at, config, table, breakdown);
        self.snapshots.insert(0, snapshot);
        id
    }

    /// Get a snapshot by id.
    pub fn get(&self, id: u64) -> Option<&SavedPlanSnapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    /// Find a snapshot by id or label.
    ///
    /// Labels match case-insensitively first, then by closest fuzzy match.
    pub fn find(&self, query: &str) -> Result<&SavedPlanSnapshot> {
        let query = query.trim();

        if let Ok(id) = query.parse::<u64>() {
            if let Some(snapshot) = self.get(id) {
                return Ok(snapshot);
            }
        }

        let wanted = query.to_lowercase();
        if let Some(snapshot) = self.snapshots.iter().find(|s| s.key() == wanted) {
            return Ok(snapshot);
        }

        self.snapshots
            .iter()
            .map(|s| (s, jaro_winkler(&s.key(), &wanted)))
            .filter(|(_, score)| *score > LABEL_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(s, _)| s)
            .ok_or_else(|| PriceError::SnapshotNotFound(query.to_string()))
    }

    /// Remove a snapshot by id or label.
    pub fn remove(&mut self, query: &str) -> Result<SavedPlanSnapshot> {
        let id = self.find(query)?.id;
        let index = self
            .snapshots
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| PriceError::SnapshotNotFound(query.to_string()))?;

        let removed = self.snapshots.remove(index);
        tracing::info!(id, label = %removed.label, "removed plan");
        Ok(removed)
    }

    /// All snapshots, newest first.
    pub fn all(&self) -> &[SavedPlanSnapshot] {
        &self.snapshots
    }

    /// Count of saved plans.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if no plans are saved.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
