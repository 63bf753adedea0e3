//! Typed tables for the three dashboard datasets.
//! All rows are immutable once loaded; the `Dashboard` bundle is created
//! once at startup and held for the lifetime of the session.

use chrono::NaiveDate;

/// One row of the revenue forecast table, ordered by date ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub base_forecast: f64,
    pub best_case: f64,
    pub worst_case: f64,
    pub upper_ci: f64,
    pub lower_ci: f64,
}

impl ForecastRow {
    /// True when the confidence interval actually brackets the base forecast.
    pub fn ci_is_consistent(&self) -> bool {
        self.lower_ci <= self.base_forecast && self.base_forecast <= self.upper_ci
    }
}

/// One row of the ROI simulation table. `segment` is the lookup key and
/// must be unique within the table.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiRow {
    pub segment: String,
    pub investment: f64,
    pub projected_gain: f64,
    pub roi: f64,
    pub break_even_revenue: f64,
}

/// One row of the customer segment summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRow {
    pub cluster: String,
    pub decision_action: String,
    pub customer_count: u64,
    pub avg_recency: f64,
    pub avg_frequency: f64,
    pub avg_monetary: f64,
}

/// The three loaded tables. Read-only after load; no write-back.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub forecast: Vec<ForecastRow>,
    pub roi: Vec<RoiRow>,
    pub segments: Vec<SegmentRow>,
}
