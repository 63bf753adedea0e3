//! Page Views
//! The four dashboard pages. Each view owns its interaction state and the
//! series derived from it; derived data is rebuilt only when a control
//! actually changes, never per frame.

use crate::charts::{ChartPlotter, ConfidenceBand, GroupedBars, RoiField, Scenario, SeriesBuilder};
use crate::data::{Dashboard, ForecastRow, RoiRow, SegmentRow};
use crate::gui::format::{format_count, format_money, format_multiple};
use crate::stats::{Aggregator, MetricError};
use chrono::NaiveDate;
use egui::{Color32, ComboBox, RichText};

const CHART_HEIGHT: f32 = 340.0;

/// The four dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    ExecutiveSummary,
    CustomerSegmentation,
    RevenueForecasting,
    RoiAnalysis,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::ExecutiveSummary,
        Page::CustomerSegmentation,
        Page::RevenueForecasting,
        Page::RoiAnalysis,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::ExecutiveSummary => "Executive Summary",
            Page::CustomerSegmentation => "Customer Segmentation",
            Page::RevenueForecasting => "Revenue Forecasting",
            Page::RoiAnalysis => "ROI Analysis",
        }
    }
}

fn page_header(ui: &mut egui::Ui, title: &str) {
    ui.label(RichText::new(title).size(24.0).strong());
    ui.add_space(6.0);
    ui.separator();
    ui.add_space(10.0);
}

fn metric_tile(ui: &mut egui::Ui, label: &str, value: &str) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_min_width(170.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(22.0).strong());
            });
        });
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).size(16.0).strong());
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Executive Summary
// ---------------------------------------------------------------------------

/// Top-line metrics plus the segment distribution donut and the ROI ranking.
/// Everything here is derived once from the loaded tables; there are no
/// controls on this page.
pub struct ExecutiveView {
    tiles: [(String, String); 4],
    donut_slices: Vec<(String, f64)>,
    roi_labels: Vec<String>,
    roi_values: Vec<f64>,
}

impl ExecutiveView {
    pub fn new(data: &Dashboard) -> Self {
        let avg_roi = match Aggregator::average_roi(&data.roi) {
            Ok(v) => format_multiple(v),
            Err(_) => "N/A".to_string(),
        };
        let tiles = [
            (
                "Total Customers".to_string(),
                format_count(Aggregator::total_customers(&data.segments)),
            ),
            (
                "Projected Gain".to_string(),
                format_money(Aggregator::total_projected_gain(&data.roi), 2),
            ),
            ("Avg ROI".to_string(), avg_roi),
            (
                "Total Investment".to_string(),
                format_money(Aggregator::total_investment(&data.roi), 0),
            ),
        ];

        // Customer counts grouped by decision action, first-seen order.
        let mut donut_slices: Vec<(String, f64)> = Vec::new();
        for row in &data.segments {
            match donut_slices
                .iter_mut()
                .find(|(action, _)| action == &row.decision_action)
            {
                Some((_, count)) => *count += row.customer_count as f64,
                None => donut_slices.push((row.decision_action.clone(), row.customer_count as f64)),
            }
        }

        let ranked = SeriesBuilder::sorted_by(&data.roi, RoiField::Roi, true);
        Self {
            tiles,
            donut_slices,
            roi_labels: ranked.iter().map(|r| r.segment.clone()).collect(),
            roi_values: ranked.iter().map(|r| r.roi).collect(),
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        page_header(ui, "Executive Summary");

        ui.horizontal(|ui| {
            for (label, value) in &self.tiles {
                metric_tile(ui, label, value);
                ui.add_space(10.0);
            }
        });

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(10.0);

        let half = (ui.available_width() - 20.0) / 2.0;
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(half);
                section_label(ui, "Customer Distribution by Segment");
                ChartPlotter::draw_donut_chart(ui, &self.donut_slices, 220.0);
            });
            ui.add_space(20.0);
            ui.vertical(|ui| {
                ui.set_width(half);
                section_label(ui, "ROI by Segment");
                ChartPlotter::draw_bar_chart(
                    ui,
                    "roi_by_segment",
                    &self.roi_labels,
                    &self.roi_values,
                    "ROI (x)",
                    280.0,
                );
            });
        });
    }
}

// ---------------------------------------------------------------------------
// Customer Segmentation
// ---------------------------------------------------------------------------

/// Segment summary table, RFM bubble scatter and monetary-by-cluster bars.
pub struct SegmentationView {
    rows: Vec<SegmentRow>,
    /// Distinct decision actions in first-seen order; indexes the palette.
    actions: Vec<String>,
}

impl SegmentationView {
    pub fn new(data: &Dashboard) -> Self {
        let mut actions: Vec<String> = Vec::new();
        for row in &data.segments {
            if !actions.contains(&row.decision_action) {
                actions.push(row.decision_action.clone());
            }
        }
        Self {
            rows: data.segments.clone(),
            actions,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        page_header(ui, "Customer Segmentation Analysis");

        self.draw_table(ui);

        ui.add_space(16.0);

        let half = (ui.available_width() - 20.0) / 2.0;
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(half);
                section_label(ui, "Recency vs Frequency");
                ChartPlotter::draw_rfm_scatter(ui, &self.rows, &self.actions, 300.0);
            });
            ui.add_space(20.0);
            ui.vertical(|ui| {
                ui.set_width(half);
                section_label(ui, "Monetary Value by Cluster");
                let labels: Vec<String> = self.rows.iter().map(|r| r.cluster.clone()).collect();
                let values: Vec<f64> = self.rows.iter().map(|r| r.avg_monetary).collect();
                ChartPlotter::draw_bar_chart(
                    ui,
                    "monetary_by_cluster",
                    &labels,
                    &values,
                    "Avg Monetary ($)",
                    300.0,
                );
            });
        });
    }

    fn draw_table(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("segment_table")
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([14.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Cluster",
                            "Action",
                            "Customers",
                            "Avg Recency",
                            "Avg Frequency",
                            "Avg Monetary",
                        ] {
                            ui.label(RichText::new(header).strong().size(12.0));
                        }
                        ui.end_row();

                        for row in &self.rows {
                            ui.label(RichText::new(&row.cluster).size(12.0));
                            ui.label(RichText::new(&row.decision_action).size(12.0));
                            ui.label(RichText::new(format_count(row.customer_count)).size(12.0));
                            ui.label(RichText::new(format!("{:.1}", row.avg_recency)).size(12.0));
                            ui.label(RichText::new(format!("{:.1}", row.avg_frequency)).size(12.0));
                            ui.label(
                                RichText::new(format_money(row.avg_monetary, 2)).size(12.0),
                            );
                            ui.end_row();
                        }
                    });
            });
    }
}

// ---------------------------------------------------------------------------
// Revenue Forecasting
// ---------------------------------------------------------------------------

/// Scenario multi-select over the banded forecast chart. The CI band is
/// fixed; the scenario lines are rebuilt only when the selection changes.
pub struct ForecastView {
    forecast: Vec<ForecastRow>,
    band: ConfidenceBand,
    selected: [bool; 3],
    series: Vec<(Scenario, Vec<(NaiveDate, f64)>)>,
}

impl ForecastView {
    pub fn new(data: &Dashboard) -> Self {
        let band = SeriesBuilder::confidence_band(&data.forecast);
        let series = SeriesBuilder::scenario_series(&data.forecast, &Scenario::ALL);
        Self {
            forecast: data.forecast.clone(),
            band,
            selected: [true; 3],
            series,
        }
    }

    fn selected_scenarios(&self) -> Vec<Scenario> {
        Scenario::ALL
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &on)| on)
            .map(|(&s, _)| s)
            .collect()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        page_header(ui, "Revenue Forecasting Scenarios");

        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("Scenarios:");
            for (i, scenario) in Scenario::ALL.iter().enumerate() {
                if ui.checkbox(&mut self.selected[i], scenario.label()).changed() {
                    changed = true;
                }
            }
        });
        if changed {
            self.series = SeriesBuilder::scenario_series(&self.forecast, &self.selected_scenarios());
        }

        ui.add_space(10.0);
        section_label(ui, "6-Month Revenue Projection");
        ChartPlotter::draw_forecast_chart(ui, &self.band, &self.series, CHART_HEIGHT);

        ui.add_space(8.0);
        ui.label(
            RichText::new("The shaded area is the 95% confidence interval for the base forecast.")
                .size(12.0)
                .color(Color32::GRAY),
        );
    }
}

// ---------------------------------------------------------------------------
// ROI Analysis
// ---------------------------------------------------------------------------

/// Deep-dive metric tiles for the selected segment. Per-row failures (zero
/// investment, bad key) degrade to "N/A" or an inline notice instead of
/// taking the view down.
struct DeepDive {
    roi: String,
    break_even: String,
    efficiency: String,
    notice: Option<String>,
}

impl DeepDive {
    fn compute(roi: &[RoiRow], segment: &str) -> Self {
        match Aggregator::lookup_segment(roi, segment) {
            Ok(row) => {
                let efficiency = match Aggregator::efficiency_score(row) {
                    Ok(score) => format!("{:.1}", score),
                    Err(MetricError::ZeroInvestment(_)) => "N/A".to_string(),
                    Err(e) => {
                        log::warn!("efficiency score for '{}': {}", segment, e);
                        "N/A".to_string()
                    }
                };
                Self {
                    roi: format!("{:.2}x", row.roi),
                    break_even: format_money(row.break_even_revenue, 2),
                    efficiency,
                    notice: None,
                }
            }
            Err(e) => Self {
                roi: "N/A".to_string(),
                break_even: "N/A".to_string(),
                efficiency: "N/A".to_string(),
                notice: Some(e.to_string()),
            },
        }
    }
}

/// Grouped investment/gain bars plus the per-segment deep dive.
pub struct RoiView {
    roi: Vec<RoiRow>,
    bars: GroupedBars,
    selected_segment: String,
    deep_dive: DeepDive,
}

impl RoiView {
    pub fn new(data: &Dashboard) -> Self {
        let bars =
            SeriesBuilder::grouped_bars(&data.roi, RoiField::Investment, RoiField::ProjectedGain);
        let selected_segment = data
            .roi
            .first()
            .map(|r| r.segment.clone())
            .unwrap_or_default();
        let deep_dive = DeepDive::compute(&data.roi, &selected_segment);
        Self {
            roi: data.roi.clone(),
            bars,
            selected_segment,
            deep_dive,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        page_header(ui, "Investment & ROI Simulation");

        section_label(ui, "Investment vs. Projected Gain");
        ChartPlotter::draw_grouped_bars(ui, &self.bars, CHART_HEIGHT);

        ui.add_space(14.0);
        ui.separator();
        ui.add_space(8.0);

        section_label(ui, "Segment Deep Dive");
        let mut changed = false;
        ComboBox::from_label("Segment")
            .selected_text(&self.selected_segment)
            .show_ui(ui, |ui| {
                for row in &self.roi {
                    if ui
                        .selectable_label(self.selected_segment == row.segment, &row.segment)
                        .clicked()
                        && self.selected_segment != row.segment
                    {
                        self.selected_segment = row.segment.clone();
                        changed = true;
                    }
                }
            });
        if changed {
            self.deep_dive = DeepDive::compute(&self.roi, &self.selected_segment);
        }

        ui.add_space(10.0);
        if let Some(notice) = &self.deep_dive.notice {
            ui.label(
                RichText::new(notice)
                    .size(13.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }
        ui.horizontal(|ui| {
            metric_tile(ui, "ROI", &self.deep_dive.roi);
            ui.add_space(10.0);
            metric_tile(ui, "Break-Even Target", &self.deep_dive.break_even);
            ui.add_space(10.0);
            metric_tile(ui, "Efficiency Score", &self.deep_dive.efficiency);
        });
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

    #[test]
    fn deep_dive_renders_na_for_zero_investment() {
        let roi = vec![roi_row("Lost", 0.0, 500.0, 0.0)];
        let dive = DeepDive::compute(&roi, "Lost");
        assert_eq!(dive.efficiency, "N/A");
        assert!(dive.notice.is_none());
    }

    #[test]
    fn deep_dive_surfaces_lookup_failure_without_panicking() {
        let roi = vec![roi_row("Champions", 1000.0, 2500.0, 2.5)];
        let dive = DeepDive::compute(&roi, "Ghosts");
        assert!(dive.notice.is_some());
        assert_eq!(dive.roi, "N/A");
    }

    #[test]
    fn executive_view_aggregates_donut_by_action() {
        let data = Dashboard {
            forecast: Vec::new(),
            roi: vec![roi_row("Champions", 1000.0, 2500.0, 2.5)],
            segments: vec![
                SegmentRow {
                    cluster: "0".to_string(),
                    decision_action: "Retain".to_string(),
                    customer_count: 100,
                    avg_recency: 1.0,
                    avg_frequency: 1.0,
                    avg_monetary: 1.0,
                },
                SegmentRow {
                    cluster: "1".to_string(),
                    decision_action: "Retain".to_string(),
                    customer_count: 50,
                    avg_recency: 1.0,
                    avg_frequency: 1.0,
                    avg_monetary: 1.0,
                },
                SegmentRow {
                    cluster: "2".to_string(),
                    decision_action: "Re-engage".to_string(),
                    customer_count: 25,
                    avg_recency: 1.0,
                    avg_frequency: 1.0,
                    avg_monetary: 1.0,
                },
            ],
        };
        let view = ExecutiveView::new(&data);
        assert_eq!(
            view.donut_slices,
            vec![("Retain".to_string(), 150.0), ("Re-engage".to_string(), 25.0)]
        );
        assert_eq!(view.tiles[0].1, "175");
    }

    #[test]
    fn forecast_view_rebuilds_series_from_selection() {
        let data = Dashboard {
            forecast: vec![ForecastRow {
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                base_forecast: 1000.0,
                best_case: 1200.0,
                worst_case: 800.0,
                upper_ci: 1100.0,
                lower_ci: 900.0,
            }],
            roi: Vec::new(),
            segments: Vec::new(),
        };
        let mut view = ForecastView::new(&data);
        assert_eq!(view.series.len(), 3);

        view.selected = [false, true, false];
        view.series =
            SeriesBuilder::scenario_series(&view.forecast, &view.selected_scenarios());
        assert_eq!(view.series.len(), 1);
        assert_eq!(view.series[0].0, Scenario::BestCase);
    }
}
