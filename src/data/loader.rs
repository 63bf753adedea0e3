//! CSV Dataset Loader
//! Loads the three dashboard tables from a data directory using Polars and
//! extracts them into typed rows. The load is atomic: all three tables
//! succeed together or the whole load fails.

use crate::data::tables::{Dashboard, ForecastRow, RoiRow, SegmentRow};
use chrono::NaiveDate;
use log::{info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const FORECAST_FILE: &str = "revenue_forecast_scenarios.csv";
pub const ROI_FILE: &str = "roi_simulation_results.csv";
pub const SEGMENT_FILE: &str = "segment_decision_summary.csv";

#[derive(Error, Debug)]
pub enum DataError {
    #[error("data file not found: {path}")]
    FileMissing { path: PathBuf },
    #[error("failed to read {file}: {source}")]
    Csv { file: String, source: PolarsError },
    #[error("{file}: required column '{column}' is missing")]
    MissingColumn { file: String, column: String },
    #[error("{file}: row {row}: column '{column}' holds no usable value")]
    BadValue {
        file: String,
        column: String,
        row: usize,
    },
    #[error("{file}: row {row}: cannot parse date '{value}' (day-first expected)")]
    BadDate {
        file: String,
        row: usize,
        value: String,
    },
}

/// Parse a date with day-first interpretation: "05/03/2024" is 5 March 2024.
/// ISO "2024-03-05" is accepted as a fallback for already-normalized data.
pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d-%m-%Y"))
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

/// Loads the three CSV tables from a single data directory.
pub struct DatasetLoader {
    data_dir: PathBuf,
}

impl DatasetLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load all three tables. Any failure aborts the whole load; no partial
    /// dashboard is ever returned.
    pub fn load(&self) -> Result<Dashboard, DataError> {
        let forecast = self.load_forecast()?;
        let roi = self.load_roi()?;
        let segments = self.load_segments()?;

        info!(
            "loaded dashboard data: {} forecast rows, {} ROI segments, {} clusters",
            forecast.len(),
            roi.len(),
            segments.len()
        );

        Ok(Dashboard {
            forecast,
            roi,
            segments,
        })
    }

    fn load_forecast(&self) -> Result<Vec<ForecastRow>, DataError> {
        let df = self.read_frame(FORECAST_FILE)?;
        let dates = str_column(&df, FORECAST_FILE, "Date")?;
        let base = f64_column(&df, FORECAST_FILE, "Base_Forecast")?;
        let best = f64_column(&df, FORECAST_FILE, "Best_Case")?;
        let worst = f64_column(&df, FORECAST_FILE, "Worst_Case")?;
        let upper = f64_column(&df, FORECAST_FILE, "Upper_CI")?;
        let lower = f64_column(&df, FORECAST_FILE, "Lower_CI")?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let raw_date = dates[i].as_str();
            let date = parse_day_first(raw_date).ok_or_else(|| DataError::BadDate {
                file: FORECAST_FILE.to_string(),
                row: i,
                value: raw_date.to_string(),
            })?;
            rows.push(ForecastRow {
                date,
                base_forecast: base[i],
                best_case: best[i],
                worst_case: worst[i],
                upper_ci: upper[i],
                lower_ci: lower[i],
            });
        }

        // Chronological order regardless of file row order.
        rows.sort_by_key(|r| r.date);

        for row in &rows {
            if !row.ci_is_consistent() {
                warn!(
                    "{}: {}: CI does not bracket base forecast ({} .. {} vs {})",
                    FORECAST_FILE, row.date, row.lower_ci, row.upper_ci, row.base_forecast
                );
            }
        }

        Ok(rows)
    }

    fn load_roi(&self) -> Result<Vec<RoiRow>, DataError> {
        let df = self.read_frame(ROI_FILE)?;
        let segments = str_column(&df, ROI_FILE, "Segment")?;
        let investment = f64_column(&df, ROI_FILE, "Investment")?;
        let gain = f64_column(&df, ROI_FILE, "Projected_Gain")?;
        let roi = f64_column(&df, ROI_FILE, "ROI")?;
        let break_even = f64_column(&df, ROI_FILE, "BreakEven_Revenue")?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            if investment[i] < 0.0 {
                warn!(
                    "{}: segment '{}' has negative investment {}",
                    ROI_FILE, segments[i], investment[i]
                );
            }
            rows.push(RoiRow {
                segment: segments[i].clone(),
                investment: investment[i],
                projected_gain: gain[i],
                roi: roi[i],
                break_even_revenue: break_even[i],
            });
        }

        // Duplicate keys are rejected at lookup time; flag them early too.
        let mut seen: Vec<&str> = Vec::with_capacity(rows.len());
        for row in &rows {
            if seen.contains(&row.segment.as_str()) {
                warn!("{}: duplicate segment key '{}'", ROI_FILE, row.segment);
            } else {
                seen.push(&row.segment);
            }
        }

        Ok(rows)
    }

    fn load_segments(&self) -> Result<Vec<SegmentRow>, DataError> {
        let df = self.read_frame(SEGMENT_FILE)?;
        let clusters = str_column(&df, SEGMENT_FILE, "Cluster")?;
        let actions = str_column(&df, SEGMENT_FILE, "Decision_Action")?;
        let counts = f64_column(&df, SEGMENT_FILE, "Customer_Count")?;
        let recency = f64_column(&df, SEGMENT_FILE, "Avg_Recency")?;
        let frequency = f64_column(&df, SEGMENT_FILE, "Avg_Frequency")?;
        let monetary = f64_column(&df, SEGMENT_FILE, "Avg_Monetary")?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            if counts[i] < 0.0 || counts[i].fract() != 0.0 {
                return Err(DataError::BadValue {
                    file: SEGMENT_FILE.to_string(),
                    column: "Customer_Count".to_string(),
                    row: i,
                });
            }
            rows.push(SegmentRow {
                cluster: clusters[i].clone(),
                decision_action: actions[i].clone(),
                customer_count: counts[i] as u64,
                avg_recency: recency[i],
                avg_frequency: frequency[i],
                avg_monetary: monetary[i],
            });
        }

        Ok(rows)
    }

    /// Read one CSV into a DataFrame. "file missing" and "file malformed"
    /// stay distinguishable for diagnostics.
    fn read_frame(&self, file: &str) -> Result<DataFrame, DataError> {
        let path = self.data_dir.join(file);
        if !path.is_file() {
            return Err(DataError::FileMissing { path });
        }

        LazyCsvReader::new(&path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| DataError::Csv {
                file: file.to_string(),
                source,
            })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Extract a required column as f64 values.
fn f64_column(df: &DataFrame, file: &str, name: &str) -> Result<Vec<f64>, DataError> {
    let column = require_column(df, file, name)?;
    let casted = column
        .cast(&DataType::Float64)
        .map_err(|source| DataError::Csv {
            file: file.to_string(),
            source,
        })?;
    let ca = casted.f64().map_err(|source| DataError::Csv {
        file: file.to_string(),
        source,
    })?;

    let mut values = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        match ca.get(i) {
            Some(v) if !v.is_nan() => values.push(v),
            _ => {
                return Err(DataError::BadValue {
                    file: file.to_string(),
                    column: name.to_string(),
                    row: i,
                })
            }
        }
    }
    Ok(values)
}

/// Extract a required column as strings.
fn str_column(df: &DataFrame, file: &str, name: &str) -> Result<Vec<String>, DataError> {
    let column = require_column(df, file, name)?;
    let series = column.as_materialized_series();

    let mut values = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let value = series.get(i).map_err(|source| DataError::Csv {
            file: file.to_string(),
            source,
        })?;
        if value.is_null() {
            return Err(DataError::BadValue {
                file: file.to_string(),
                column: name.to_string(),
                row: i,
            });
        }
        values.push(value.to_string().trim_matches('"').to_string());
    }
    Ok(values)
}

fn require_column<'a>(df: &'a DataFrame, file: &str, name: &str) -> Result<&'a Column, DataError> {
    df.column(name).map_err(|_| DataError::MissingColumn {
        file: file.to_string(),
        column: name.to_string(),
    })
}
