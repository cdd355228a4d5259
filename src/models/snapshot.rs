use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PriceError;
use crate::models::{
    DayBand, PlanConfiguration, PriceBreakdown, PricingTable, Promo, PromoKind, PromoScope,
    WeekBand, pad_meal_tiers,
};
use crate::pricing::compute_breakdown;

/// A plan saved by the user, with the table it was priced against.
///
/// Snapshots are only ever created or deleted, never edited. Reading also
/// accepts the browser calculator's history entries, where the promo is
/// split into flat fields and the table and total sit inside `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRecord")]
pub struct SavedPlanSnapshot {
    pub id: u64,
    pub label: String,
    #[serde(rename = "date")]
    pub saved_at: DateTime<Utc>,
    #[serde(rename = "data")]
    pub config: PlanConfiguration,
    #[serde(rename = "lookupTable")]
    pub table: PricingTable,
    #[serde(rename = "total")]
    pub grand_total: f64,
}

impl SavedPlanSnapshot {
    pub fn new(
        id: u64,
        label: String,
        saved_at: DateTime<Utc>,
        config: PlanConfiguration,
        table: PricingTable,
        breakdown: &PriceBreakdown,
    ) -> Self {
        Self {
            id,
            label,
            saved_at,
            config,
            table,
            grand_total: breakdown.grand_total,
        }
    }

    /// Price the stored plan again with the stored table.
    pub fn recompute(&self) -> PriceBreakdown {
        compute_breakdown(&self.config, &self.table)
    }

    /// Canonical key for label lookups (lowercase).
    pub fn key(&self) -> String {
        self.label.to_lowercase()
    }
}

/// A stored total: a number here, a fixed-point string in browser exports.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTotal {
    Amount(f64),
    Text(String),
}

impl StoredTotal {
    fn amount(self) -> Result<f64, PriceError> {
        match self {
            StoredTotal::Amount(amount) => Ok(amount),
            StoredTotal::Text(text) => text.trim().parse().map_err(|_| {
                PriceError::InvalidInput(format!("saved total '{}' is not a number", text))
            }),
        }
    }
}

/// Plan fields as found under `data`, in either layout.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanRecord {
    meal_calories: Option<Vec<u32>>,
    num_snacks: Option<u8>,
    num_days: Option<DayBand>,
    num_weeks: Option<WeekBand>,
    surcharge_percent: Option<f64>,
    reduction_percent: Option<f64>,
    markup_percent: Option<f64>,
    promo: Option<Promo>,
    promo_type: Option<PromoKind>,
    promo_value: Option<f64>,
    promo_scope: Option<PromoScope>,
    lookup_table: Option<PricingTable>,
    total: Option<StoredTotal>,
}

#[derive(Deserialize)]
struct SnapshotRecord {
    id: u64,
    label: String,
    date: DateTime<Utc>,
    data: PlanRecord,
    #[serde(rename = "lookupTable")]
    lookup_table: Option<PricingTable>,
    total: Option<StoredTotal>,
}

impl TryFrom<SnapshotRecord> for SavedPlanSnapshot {
    type Error = PriceError;

    fn try_from(record: SnapshotRecord) -> Result<Self, Self::Error> {
        let data = record.data;
        let defaults = PlanConfiguration::default();

        let mut promo = data.promo.unwrap_or_default();
        if let Some(kind) = data.promo_type {
            promo.kind = kind;
        }
        if let Some(value) = data.promo_value {
            promo.value = value;
        }
        if let Some(scope) = data.promo_scope {
            promo.scope = scope;
        }

        let config = PlanConfiguration {
            meal_calorie_tiers: data
                .meal_calories
                .map_or(defaults.meal_calorie_tiers, |meals| pad_meal_tiers(&meals)),
            snack_count: data.num_snacks.unwrap_or(defaults.snack_count),
            day_count: data.num_days.unwrap_or(defaults.day_count),
            week_count: data.num_weeks.unwrap_or(defaults.week_count),
            surcharge_percent: data.surcharge_percent.unwrap_or(defaults.surcharge_percent),
            reduction_percent: data.reduction_percent.unwrap_or(defaults.reduction_percent),
            markup_percent: data.markup_percent.unwrap_or(defaults.markup_percent),
            promo,
        };

        let table = record.lookup_table.or(data.lookup_table).ok_or_else(|| {
            PriceError::InvalidInput(format!("saved plan '{}' has no pricing table", record.label))
        })?;

        let grand_total = match record.total.or(data.total) {
            Some(total) => total.amount()?,
            None => compute_breakdown(&config, &table).grand_total,
        };

        Ok(Self {
            id: record.id,
            label: record.label,
            saved_at: record.date,
            config,
            table,
            grand_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROWSER_ENTRY: &str = r#"{
        "id": 1735689600000,
        "label": "Office",
        "data": {
            "mealCalories": [700, 600, 0, 0, 0],
            "numSnacks": 2,
            "numDays": 6,
            "numWeeks": 2,
            "promoType": "flat",
            "promoValue": 25,
            "promoScope": "both",
            "lookupTable": {
                "mealPrices": {"200": 12, "400": 49, "500": 53, "600": 56, "700": 60, "800": 63},
                "mealDiscounts": [0, 20, 30, 60, 60],
                "dayDiscounts": {"5": 0, "6": 60, "7": 60},
                "weekDiscounts": {"1": 0, "2": 0, "4": 7.5},
                "snackDiscounts": {"1": 20, "2": 30, "3": 40, "4": 40, "5": 40},
                "bagFee": 0.6
            },
            "total": "1234.56"
        },
        "date": "2025-01-01T00:00:00.000Z",
        "pricing": "1"
    }"#;

    #[test]
    fn test_reads_browser_entry() {
        let snapshot: SavedPlanSnapshot = serde_json::from_str(BROWSER_ENTRY).unwrap();

        assert_eq!(snapshot.id, 1735689600000);
        assert_eq!(snapshot.config.meal_calorie_tiers, [700, 600, 0, 0, 0]);
        assert_eq!(snapshot.config.day_count, DayBand::Six);
        assert_eq!(snapshot.config.week_count, WeekBand::Two);
        assert_eq!(snapshot.config.promo.kind, PromoKind::Flat);
        assert_eq!(snapshot.config.promo.scope, PromoScope::Total);
        assert_eq!(snapshot.config.promo.value, 25.0);
        assert_eq!(snapshot.table, PricingTable::standard());
        assert!((snapshot.grand_total - 1234.56).abs() < 1e-9);
    }

    #[test]
    fn test_written_snapshot_reads_back() {
        let mut config = PlanConfiguration::default();
        config.surcharge_percent = 5.0;
        let table = PricingTable::legacy();
        let breakdown = compute_breakdown(&config, &table);
        let snapshot =
            SavedPlanSnapshot::new(9, "Solo".to_string(), Utc::now(), config, table, &breakdown);

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: SavedPlanSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.config, snapshot.config);
        assert_eq!(restored.table, snapshot.table);
        assert_eq!(restored.saved_at, snapshot.saved_at);
    }

    #[test]
    fn test_missing_total_is_recomputed() {
        let json = BROWSER_ENTRY.replace(r#""total": "1234.56""#, r#""pricing": "1""#);
        let snapshot: SavedPlanSnapshot = serde_json::from_str(&json).unwrap();
        assert!((snapshot.grand_total - snapshot.recompute().grand_total).abs() < 1e-9);
    }

    #[test]
    fn test_unreadable_total_is_rejected() {
        let json = BROWSER_ENTRY.replace("1234.56", "n/a");
        assert!(serde_json::from_str::<SavedPlanSnapshot>(&json).is_err());
    }

    #[test]
    fn test_entry_without_table_is_rejected() {
        let json = r#"{"id": 1, "label": "Bare", "date": "2025-01-01T00:00:00Z",
            "data": {"mealCalories": [800], "numSnacks": 1, "numDays": 5, "numWeeks": 4}}"#;
        assert!(serde_json::from_str::<SavedPlanSnapshot>(json).is_err());
    }
}
