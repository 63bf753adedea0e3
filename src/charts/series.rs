//! Chart Series Module
//! Reshapes the loaded tables into chart-ready series: sorted bars, the
//! confidence-band polygon, scenario lines and grouped bars.

use crate::data::{ForecastRow, RoiRow};
use chrono::NaiveDate;

/// Numeric fields of the ROI table usable for sorting and bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiField {
    Investment,
    ProjectedGain,
    Roi,
    BreakEvenRevenue,
}

impl RoiField {
    pub fn label(self) -> &'static str {
        match self {
            RoiField::Investment => "Investment",
            RoiField::ProjectedGain => "Projected Gain",
            RoiField::Roi => "ROI",
            RoiField::BreakEvenRevenue => "Break-Even Revenue",
        }
    }

    pub fn value(self, row: &RoiRow) -> f64 {
        match self {
            RoiField::Investment => row.investment,
            RoiField::ProjectedGain => row.projected_gain,
            RoiField::Roi => row.roi,
            RoiField::BreakEvenRevenue => row.break_even_revenue,
        }
    }
}

/// A forecast scenario column. Iteration order of a caller-supplied slice
/// is preserved so each scenario keeps its designated color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    BaseForecast,
    BestCase,
    WorstCase,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::BaseForecast,
        Scenario::BestCase,
        Scenario::WorstCase,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Scenario::BaseForecast => "Base Forecast",
            Scenario::BestCase => "Best Case",
            Scenario::WorstCase => "Worst Case",
        }
    }

    pub fn value(self, row: &ForecastRow) -> f64 {
        match self {
            Scenario::BaseForecast => row.base_forecast,
            Scenario::BestCase => row.best_case,
            Scenario::WorstCase => row.worst_case,
        }
    }
}

/// Closed polygon between the upper and lower CI curves over the shared
/// date axis: `xs = dates ++ reverse(dates)`, `ys = upper ++ reverse(lower)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBand {
    pub xs: Vec<NaiveDate>,
    pub ys: Vec<f64>,
}

/// Two parallel per-segment value sequences for side-by-side bars.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBars {
    pub segments: Vec<String>,
    pub field_a: RoiField,
    pub values_a: Vec<f64>,
    pub field_b: RoiField,
    pub values_b: Vec<f64>,
}

/// Builds chart-ready series out of the loaded tables.
pub struct SeriesBuilder;

impl SeriesBuilder {
    /// Stable sort of the ROI table by one numeric field; ties keep their
    /// original order.
    pub fn sorted_by(roi: &[RoiRow], field: RoiField, descending: bool) -> Vec<RoiRow> {
        let mut rows = roi.to_vec();
        rows.sort_by(|a, b| {
            let ord = field
                .value(a)
                .partial_cmp(&field.value(b))
                .unwrap_or(std::cmp::Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        rows
    }

    /// The fillable band between the CI curves: upper values in
    /// chronological order, then lower values traversed back.
    pub fn confidence_band(forecast: &[ForecastRow]) -> ConfidenceBand {
        let mut xs: Vec<NaiveDate> = forecast.iter().map(|r| r.date).collect();
        let mut ys: Vec<f64> = forecast.iter().map(|r| r.upper_ci).collect();
        xs.extend(forecast.iter().rev().map(|r| r.date));
        ys.extend(forecast.iter().rev().map(|r| r.lower_ci));
        ConfidenceBand { xs, ys }
    }

    /// Project the requested scenario columns as (date, value) sequences,
    /// in the caller-requested scenario order.
    pub fn scenario_series(
        forecast: &[ForecastRow],
        scenarios: &[Scenario],
    ) -> Vec<(Scenario, Vec<(NaiveDate, f64)>)> {
        scenarios
            .iter()
            .map(|&scenario| {
                let points = forecast
                    .iter()
                    .map(|row| (row.date, scenario.value(row)))
                    .collect();
                (scenario, points)
            })
            .collect()
    }

    /// Two parallel sequences keyed by segment for grouped bar rendering.
    pub fn grouped_bars(roi: &[RoiRow], field_a: RoiField, field_b: RoiField) -> GroupedBars {
        GroupedBars {
            segments: roi.iter().map(|r| r.segment.clone()).collect(),
            field_a,
            values_a: roi.iter().map(|r| field_a.value(r)).collect(),
            field_b,
            values_b: roi.iter().map(|r| field_b.value(r)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roi_row(segment: &str, investment: f64, gain: f64, roi: f64) -> RoiRow {
        RoiRow {
            segment: segment.to_string(),
            investment,
            projected_gain: gain,
            roi,
            break_even_revenue: investment,
        }
    }

    fn forecast(n: u32) -> Vec<ForecastRow> {
        (0..n)
            .map(|i| ForecastRow {
                date: NaiveDate::from_ymd_opt(2024, 3, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(7 * i as u64))
                    .unwrap(),
                base_forecast: 1000.0 + i as f64,
                best_case: 1200.0 + i as f64,
                worst_case: 800.0 + i as f64,
                upper_ci: 1100.0 + i as f64,
                lower_ci: 900.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn sorted_by_roi_descending_is_monotonic() {
        let roi = vec![
            roi_row("A", 100.0, 150.0, 1.5),
            roi_row("B", 100.0, 250.0, 2.5),
            roi_row("C", 100.0, 50.0, 0.5),
        ];
        let sorted = SeriesBuilder::sorted_by(&roi, RoiField::Roi, true);
        let values: Vec<f64> = sorted.iter().map(|r| r.roi).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn sorted_by_break_even_ascending() {
        let roi = vec![
            roi_row("A", 900.0, 150.0, 1.5),
            roi_row("B", 100.0, 250.0, 2.5),
        ];
        let sorted = SeriesBuilder::sorted_by(&roi, RoiField::BreakEvenRevenue, false);
        assert_eq!(sorted[0].segment, "B");
        assert_eq!(RoiField::BreakEvenRevenue.label(), "Break-Even Revenue");
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let roi = vec![
            roi_row("first", 100.0, 100.0, 1.0),
            roi_row("high", 100.0, 300.0, 3.0),
            roi_row("second", 100.0, 100.0, 1.0),
        ];
        let sorted = SeriesBuilder::sorted_by(&roi, RoiField::Roi, true);
        assert_eq!(sorted[0].segment, "high");
        // Equal ROI rows retain input order.
        assert_eq!(sorted[1].segment, "first");
        assert_eq!(sorted[2].segment, "second");
    }

    #[test]
    fn confidence_band_is_double_traversal() {
        let rows = forecast(4);
        let band = SeriesBuilder::confidence_band(&rows);

        assert_eq!(band.xs.len(), 2 * rows.len());
        assert_eq!(band.ys.len(), 2 * rows.len());

        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        assert_eq!(&band.xs[..4], &dates[..]);
        let mut reversed = dates.clone();
        reversed.reverse();
        assert_eq!(&band.xs[4..], &reversed[..]);

        assert_eq!(band.ys[0], rows[0].upper_ci);
        assert_eq!(band.ys[7], rows[0].lower_ci);
    }

    #[test]
    fn confidence_band_of_empty_forecast_is_empty() {
        let band = SeriesBuilder::confidence_band(&[]);
        assert!(band.xs.is_empty() && band.ys.is_empty());
    }

    #[test]
    fn scenario_series_preserves_requested_order() {
        let rows = forecast(3);
        let requested = [Scenario::WorstCase, Scenario::BaseForecast];
        let series = SeriesBuilder::scenario_series(&rows, &requested);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, Scenario::WorstCase);
        assert_eq!(series[1].0, Scenario::BaseForecast);
        assert_eq!(series[0].1[0], (rows[0].date, rows[0].worst_case));
        assert_eq!(series[1].1[2], (rows[2].date, rows[2].base_forecast));
    }

    #[test]
    fn grouped_bars_are_parallel() {
        let roi = vec![
            roi_row("Champions", 1000.0, 2500.0, 2.5),
            roi_row("At Risk", 500.0, 600.0, 1.2),
        ];
        let bars =
            SeriesBuilder::grouped_bars(&roi, RoiField::Investment, RoiField::ProjectedGain);
        assert_eq!(bars.segments, vec!["Champions", "At Risk"]);
        assert_eq!(bars.values_a, vec![1000.0, 500.0]);
        assert_eq!(bars.values_b, vec![2500.0, 600.0]);
    }
}
