//! Chart Plotter Module
//! Renders the dashboard visualizations with egui_plot, plus a painter-based
//! donut chart for the segment distribution.

use crate::charts::series::{ConfidenceBand, GroupedBars, Scenario};
use crate::data::SegmentRow;
use chrono::{Datelike, NaiveDate};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points, Polygon};

/// Scenario line colors (blue / green / red, matching the scenario's mood).
pub const BASE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
pub const BEST_COLOR: Color32 = Color32::from_rgb(44, 160, 44);
pub const WORST_COLOR: Color32 = Color32::from_rgb(214, 39, 40);

/// Confidence band fill. Premultiplied form of rgba-unmultiplied
/// (0, 100, 80, 26); `from_rgba_unmultiplied` is not `const`.
pub const BAND_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 30, 22, 26);

/// Categorical palette for decision actions and clusters.
pub const PALETTE: [Color32; 8] = [
    Color32::from_rgb(102, 197, 204), // Teal
    Color32::from_rgb(246, 207, 113), // Sand
    Color32::from_rgb(248, 156, 116), // Coral
    Color32::from_rgb(220, 176, 242), // Lilac
    Color32::from_rgb(135, 197, 95),  // Green
    Color32::from_rgb(158, 185, 243), // Blue
    Color32::from_rgb(254, 136, 177), // Pink
    Color32::from_rgb(201, 219, 116), // Olive
];

pub const INVESTMENT_COLOR: Color32 = Color32::from_rgb(255, 161, 90);
pub const GAIN_COLOR: Color32 = Color32::from_rgb(25, 211, 243);

/// Renders the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn scenario_color(scenario: Scenario) -> Color32 {
        match scenario {
            Scenario::BaseForecast => BASE_COLOR,
            Scenario::BestCase => BEST_COLOR,
            Scenario::WorstCase => WORST_COLOR,
        }
    }

    pub fn palette_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Dates plot on a day-count axis so the spacing stays proportional.
    fn date_to_x(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    fn x_to_date_label(x: f64) -> String {
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_default()
    }

    /// Banded forecast chart: CI polygon underneath, scenario lines on top.
    pub fn draw_forecast_chart(
        ui: &mut egui::Ui,
        band: &ConfidenceBand,
        series: &[(Scenario, Vec<(NaiveDate, f64)>)],
        height: f32,
    ) {
        Plot::new("forecast_chart")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .y_axis_label("Revenue ($)")
            .x_axis_formatter(|mark, _range| Self::x_to_date_label(mark.value))
            .show(ui, |plot_ui| {
                if !band.xs.is_empty() {
                    let points: PlotPoints = band
                        .xs
                        .iter()
                        .zip(band.ys.iter())
                        .map(|(&date, &y)| [Self::date_to_x(date), y])
                        .collect();
                    plot_ui.polygon(
                        Polygon::new(points)
                            .fill_color(BAND_COLOR)
                            .stroke(egui::Stroke::new(0.0, Color32::TRANSPARENT))
                            .name("95% Confidence Interval"),
                    );
                }

                for (scenario, points) in series {
                    let line: PlotPoints = points
                        .iter()
                        .map(|&(date, value)| [Self::date_to_x(date), value])
                        .collect();
                    plot_ui.line(
                        Line::new(line)
                            .color(Self::scenario_color(*scenario))
                            .width(3.0)
                            .name(scenario.label()),
                    );
                }
            });
    }

    /// Vertical bar chart over categorical labels, one palette color per bar.
    pub fn draw_bar_chart(
        ui: &mut egui::Ui,
        id: &str,
        labels: &[String],
        values: &[f64],
        y_label: &str,
        height: f32,
    ) {
        let bars: Vec<Bar> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                Bar::new(i as f64, v)
                    .width(0.6)
                    .fill(Self::palette_color(i))
                    .name(&labels[i])
            })
            .collect();

        let x_labels = labels.to_vec();
        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .y_axis_label(y_label.to_string())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    x_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Side-by-side bars per segment (e.g. Investment vs Projected Gain).
    pub fn draw_grouped_bars(ui: &mut egui::Ui, bars: &GroupedBars, height: f32) {
        let offset = 0.2;
        let width = 0.35;

        let bars_a: Vec<Bar> = bars
            .values_a
            .iter()
            .enumerate()
            .map(|(i, &v)| Bar::new(i as f64 - offset, v).width(width).fill(INVESTMENT_COLOR))
            .collect();
        let bars_b: Vec<Bar> = bars
            .values_b
            .iter()
            .enumerate()
            .map(|(i, &v)| Bar::new(i as f64 + offset, v).width(width).fill(GAIN_COLOR))
            .collect();

        let x_labels = bars.segments.clone();
        Plot::new("grouped_bars")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .y_axis_label("USD ($)")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    x_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars_a).name(bars.field_a.label()));
                plot_ui.bar_chart(BarChart::new(bars_b).name(bars.field_b.label()));
            });
    }

    /// Recency-vs-frequency bubble scatter; bubble radius tracks the
    /// cluster's customer count, color tracks the decision action.
    pub fn draw_rfm_scatter(
        ui: &mut egui::Ui,
        segments: &[SegmentRow],
        actions: &[String],
        height: f32,
    ) {
        let max_count = segments
            .iter()
            .map(|s| s.customer_count)
            .max()
            .unwrap_or(1)
            .max(1) as f64;

        Plot::new("rfm_scatter")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Avg Recency (days)")
            .y_axis_label("Avg Frequency")
            .show(ui, |plot_ui| {
                for row in segments {
                    let color_idx = actions
                        .iter()
                        .position(|a| a == &row.decision_action)
                        .unwrap_or(0);
                    let radius =
                        3.0 + 12.0 * (row.customer_count as f64 / max_count).sqrt() as f32;
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[
                            row.avg_recency,
                            row.avg_frequency,
                        ]]))
                        .radius(radius)
                        .color(Self::palette_color(color_idx))
                        .name(format!("Cluster {} ({})", row.cluster, row.decision_action)),
                    );
                }
            });
    }

    /// Donut chart drawn with the painter (egui_plot has no pie primitive).
    /// Slices are labeled in a legend next to the chart.
    pub fn draw_donut_chart(ui: &mut egui::Ui, slices: &[(String, f64)], size: f32) {
        let total: f64 = slices.iter().map(|(_, v)| v).sum();
        if total <= 0.0 {
            ui.label(RichText::new("No data").size(14.0).color(Color32::GRAY));
            return;
        }

        ui.horizontal(|ui| {
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
            let painter = ui.painter_at(rect);
            let center = rect.center();
            let radius = size * 0.45;

            let mut angle = -std::f64::consts::FRAC_PI_2;
            for (i, (_, value)) in slices.iter().enumerate() {
                let sweep = value / total * std::f64::consts::TAU;
                let steps = ((sweep / 0.05).ceil() as usize).max(2);

                let mut points = vec![center];
                for step in 0..=steps {
                    let a = angle + sweep * step as f64 / steps as f64;
                    points.push(egui::pos2(
                        center.x + radius * a.cos() as f32,
                        center.y + radius * a.sin() as f32,
                    ));
                }
                painter.add(egui::Shape::convex_polygon(
                    points,
                    Self::palette_color(i),
                    egui::Stroke::NONE,
                ));
                angle += sweep;
            }

            // Hole turns the pie into a donut.
            painter.circle_filled(center, radius * 0.45, ui.visuals().panel_fill);

            ui.add_space(12.0);
            ui.vertical(|ui| {
                for (i, (label, value)) in slices.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let (swatch, _) = ui
                            .allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                        ui.painter().rect_filled(swatch, 2.0, Self::palette_color(i));
                        let share = value / total * 100.0;
                        ui.label(
                            RichText::new(format!("{} ({:.1}%)", label, share)).size(12.0),
                        );
                    });
                }
            });
        });
    }
}
