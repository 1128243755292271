use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::aggregate::Bucket;
use crate::data::filter::ThresholdPolicy;
use crate::data::generator::ValueRange;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Largest magnitude accepted for `min_value` / `max_value`. Keeps sums over
/// the longest window and largest department list far from `i64` overflow.
pub const MAX_ABS_VALUE: i64 = 1_000_000_000;

/// Longest accepted lookback, roughly ten years.
pub const MAX_LOOKBACK_DAYS: u32 = 3_660;

/// Startup settings, read from an optional JSON file.
///
/// ```json
/// {
///   "title": "Ward Stock",
///   "seed": 42,
///   "min_value": 50,
///   "max_value": 120,
///   "items": ["Gloves", "Masks"],
///   "departments": ["ICU", "ER"],
///   "lookback_days": 30,
///   "threshold": 0.5,
///   "threshold_policy": "clamp",
///   "bucket": "week"
/// }
/// ```
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// `None` draws fresh values on every regeneration.
    pub seed: Option<u64>,
    pub min_value: i64,
    pub max_value: i64,
    /// Stock items shown in the threshold table.
    pub items: Vec<String>,
    /// Departments whose demand is charted over time.
    pub departments: Vec<String>,
    pub lookback_days: u32,
    /// Initial slider position, a fraction in `[0, 1]`.
    pub threshold: f64,
    pub threshold_policy: ThresholdPolicy,
    pub bucket: Bucket,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Ward Stock – Inventory & Demand".to_string(),
            seed: None,
            min_value: 50,
            max_value: 120,
            items: [
                "Surgical gloves",
                "N95 masks",
                "Saline 0.9% 1L",
                "IV cannulas",
                "Syringes 10ml",
                "Gauze pads",
                "Heparin 5000IU",
                "Oxygen masks",
            ]
            .map(String::from)
            .to_vec(),
            departments: ["ICU", "Emergency", "Surgery", "Pediatrics"]
                .map(String::from)
                .to_vec(),
            lookback_days: 30,
            threshold: 0.5,
            threshold_policy: ThresholdPolicy::Clamp,
            bucket: Bucket::Day,
        }
    }
}

impl DashboardConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when `path` is `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.items.is_empty(), "config lists no stock items");
        ensure!(!self.departments.is_empty(), "config lists no departments");
        ensure!(self.lookback_days > 0, "lookback_days must be at least 1");
        ensure!(
            self.lookback_days <= MAX_LOOKBACK_DAYS,
            "lookback_days must be at most {MAX_LOOKBACK_DAYS}, got {}",
            self.lookback_days
        );
        for (name, v) in [("min_value", self.min_value), ("max_value", self.max_value)] {
            ensure!(
                (-MAX_ABS_VALUE..=MAX_ABS_VALUE).contains(&v),
                "{name} must be within ±{MAX_ABS_VALUE}, got {v}"
            );
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!(
                "threshold must be a fraction in [0, 1], got {}",
                self.threshold
            );
        }
        Ok(())
    }

    pub fn value_range(&self) -> ValueRange {
        ValueRange::new(self.min_value, self.max_value)
    }
}
