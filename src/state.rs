use chrono::NaiveDate;

use ward_stock::config::DashboardConfig;
use ward_stock::data::aggregate::{aggregate, totals_by_category, Bucket};
use ward_stock::data::filter::{apply, Filtered, Threshold, ThresholdBounds};
use ward_stock::data::generator::{DateRange, Generator};
use ward_stock::data::model::Table;
use ward_stock::data::projection::{project_by_category, Series};

use crate::color::CategoryColors;

// Demand draws use their own stream so moving the date range never changes
// the stock table.
const DEMAND_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Threshold slider position in `[0, 1]`.
    pub threshold_fraction: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub bucket: Bucket,
    pub seed: Option<u64>,
    /// Name typed into the greeting field.
    pub user_name: String,

    /// Current stock level per item.
    pub stock: Table,
    /// Resolved threshold; `None` when there is no stock data to bound it.
    pub threshold: Option<Threshold>,
    /// Stock rows at or above the threshold.
    pub flagged: Filtered,

    /// Demand per department, aggregated to `bucket`.
    pub demand: Table,
    pub demand_series: Vec<Series>,
    /// Demand summed over the whole window, per department.
    pub demand_totals: Table,

    pub colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    /// The message `refilter` last put in `status_message`, so a valid
    /// threshold clears only its own error.
    threshold_error: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, today: NaiveDate) -> Self {
        let range = DateRange::trailing(today, config.lookback_days);
        let mut state = Self {
            threshold_fraction: config.threshold,
            start: range.start,
            end: range.end,
            bucket: config.bucket,
            seed: config.seed,
            user_name: String::new(),
            stock: Table::categorical(Vec::new()),
            threshold: None,
            flagged: Filtered::NoData,
            demand: Table::dated(Vec::new()),
            demand_series: Vec::new(),
            demand_totals: Table::categorical(Vec::new()),
            colors: CategoryColors::new(&config.departments),
            status_message: None,
            threshold_error: None,
            config,
        };
        state.regenerate();
        state
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }

    /// Redraw every table from scratch.
    pub fn regenerate(&mut self) {
        let mut generator = Generator::new(self.seed, self.config.value_range());
        self.stock = generator.categories(&self.config.items);
        log::info!(
            "Generated stock for {} items (seed {:?})",
            self.stock.len(),
            self.seed
        );
        self.refilter();
        self.recompute_demand();
    }

    /// Re-apply the threshold to the current stock table.
    pub fn refilter(&mut self) {
        let Some(bounds) = ThresholdBounds::of_table(&self.stock) else {
            self.threshold = None;
            self.flagged = Filtered::NoData;
            return;
        };
        match Threshold::from_fraction(
            self.threshold_fraction,
            bounds,
            self.config.threshold_policy,
        ) {
            Ok(th) => {
                self.flagged = apply(&self.stock, &th);
                self.threshold = Some(th);
                if let Some(own) = self.threshold_error.take() {
                    if self.status_message.as_deref() == Some(own.as_str()) {
                        self.status_message = None;
                    }
                }
            }
            Err(e) => {
                log::error!("Invalid threshold: {e}");
                let msg = format!("Error: {e}");
                self.threshold_error = Some(msg.clone());
                self.status_message = Some(msg);
            }
        }
    }

    /// Redraw demand for the current date range and re-aggregate it.
    pub fn recompute_demand(&mut self) {
        let range = self.date_range();
        if !range.is_valid() {
            log::warn!("End date {} precedes start {}", range.end, range.start);
        }
        let seed = self.seed.map(|s| s ^ DEMAND_STREAM);
        let mut generator = Generator::new(seed, self.config.value_range());
        let daily = generator.usage(&self.config.departments, range);
        self.demand = aggregate(&daily, self.bucket);
        self.demand_totals = totals_by_category(&self.demand);

        match project_by_category(&self.demand, "date", "measure") {
            Ok(series) => self.demand_series = series,
            Err(e) => {
                log::error!("Failed to project demand: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.demand_series.clear();
            }
        }
    }

    pub fn greeting(&self) -> Option<String> {
        greeting(&self.user_name)
    }
}

/// Greeting for a non-blank name.
pub fn greeting(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| format!("Welcome, {name}!"))
}
