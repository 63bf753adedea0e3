//! Summary Metrics Module
//! Pure functions over the loaded tables. No side effects, no hidden
//! state; everything here is re-evaluated on user interaction.

use crate::data::{RoiRow, SegmentRow};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MetricError {
    #[error("metric is undefined over an empty table")]
    EmptyTable,
    #[error("segment '{0}' has zero investment")]
    ZeroInvestment(String),
    #[error("no segment named '{0}'")]
    SegmentNotFound(String),
    #[error("segment key '{0}' is not unique")]
    DuplicateSegment(String),
}

/// Computes the dashboard's scalar summary metrics.
pub struct Aggregator;

impl Aggregator {
    pub fn total_customers(segments: &[SegmentRow]) -> u64 {
        segments.iter().map(|s| s.customer_count).sum()
    }

    pub fn total_projected_gain(roi: &[RoiRow]) -> f64 {
        roi.iter().map(|r| r.projected_gain).sum()
    }

    pub fn total_investment(roi: &[RoiRow]) -> f64 {
        roi.iter().map(|r| r.investment).sum()
    }

    /// Arithmetic mean of ROI across rows. An empty table is an error, not
    /// a silent NaN.
    pub fn average_roi(roi: &[RoiRow]) -> Result<f64, MetricError> {
        if roi.is_empty() {
            return Err(MetricError::EmptyTable);
        }
        Ok(roi.iter().map(|r| r.roi).sum::<f64>() / roi.len() as f64)
    }

    /// Projected gain per invested unit for one segment. Zero investment is
    /// an error the caller renders as "N/A" rather than a crash.
    pub fn efficiency_score(row: &RoiRow) -> Result<f64, MetricError> {
        if row.investment == 0.0 {
            return Err(MetricError::ZeroInvestment(row.segment.clone()));
        }
        Ok(row.projected_gain / row.investment)
    }

    /// Find the unique row for a segment name. More than one match is an
    /// error; silently picking the first would hide corrupt input.
    pub fn lookup_segment<'a>(
        roi: &'a [RoiRow],
        segment: &str,
    ) -> Result<&'a RoiRow, MetricError> {
        let mut matches = roi.iter().filter(|r| r.segment == segment);
        let first = matches
            .next()
            .ok_or_else(|| MetricError::SegmentNotFound(segment.to_string()))?;
        if matches.next().is_some() {
            return Err(MetricError::DuplicateSegment(segment.to_string()));
        }
        Ok(first)
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

    fn sample_roi() -> Vec<RoiRow> {
        vec![
            roi_row("Champions", 1000.0, 2500.0, 2.5),
            roi_row("At Risk", 500.0, 600.0, 1.2),
            roi_row("Lost", 200.0, 100.0, 0.5),
        ]
    }

    #[test]
    fn totals_and_mean() {
        let roi = sample_roi();
        assert_eq!(Aggregator::total_investment(&roi), 1700.0);
        assert_eq!(Aggregator::total_projected_gain(&roi), 3200.0);
        let avg = Aggregator::average_roi(&roi).unwrap();
        assert!((avg - 1.4).abs() < 1e-12);
    }

    #[test]
    fn total_investment_is_order_independent() {
        let mut roi = sample_roi();
        let forward = Aggregator::total_investment(&roi);
        roi.reverse();
        assert_eq!(Aggregator::total_investment(&roi), forward);
    }

    #[test]
    fn total_customers_sums_counts() {
        let segments = vec![
            SegmentRow {
                cluster: "0".to_string(),
                decision_action: "Retain".to_string(),
                customer_count: 1200,
                avg_recency: 12.5,
                avg_frequency: 8.2,
                avg_monetary: 540.0,
            },
            SegmentRow {
                cluster: "1".to_string(),
                decision_action: "Re-engage".to_string(),
                customer_count: 800,
                avg_recency: 95.0,
                avg_frequency: 1.4,
                avg_monetary: 120.0,
            },
        ];
        assert_eq!(Aggregator::total_customers(&segments), 2000);
    }

    #[test]
    fn average_roi_rejects_empty_table() {
        assert_eq!(Aggregator::average_roi(&[]), Err(MetricError::EmptyTable));
    }

    #[test]
    fn efficiency_score_champions() {
        let row = roi_row("Champions", 1000.0, 2500.0, 2.5);
        assert_eq!(Aggregator::efficiency_score(&row), Ok(2.5));
    }

    #[test]
    fn efficiency_score_zero_investment_fails() {
        let row = roi_row("Lost", 0.0, 500.0, 0.0);
        assert_eq!(
            Aggregator::efficiency_score(&row),
            Err(MetricError::ZeroInvestment("Lost".to_string()))
        );
    }

    #[test]
    fn lookup_segment_is_idempotent() {
        let roi = sample_roi();
        let a = Aggregator::lookup_segment(&roi, "At Risk").unwrap();
        let b = Aggregator::lookup_segment(&roi, "At Risk").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn lookup_segment_missing_and_duplicate() {
        let mut roi = sample_roi();
        assert_eq!(
            Aggregator::lookup_segment(&roi, "Ghosts").unwrap_err(),
            MetricError::SegmentNotFound("Ghosts".to_string())
        );

        roi.push(roi_row("Champions", 50.0, 60.0, 1.2));
        assert_eq!(
            Aggregator::lookup_segment(&roi, "Champions").unwrap_err(),
            MetricError::DuplicateSegment("Champions".to_string())
        );
    }
}
