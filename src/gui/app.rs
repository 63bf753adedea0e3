//! Dashboard Application
//! Loads the datasets once at startup and dispatches each frame to the
//! selected page view. A failed load renders a fatal error page and
//! nothing else.

use crate::config::AppConfig;
use crate::data::DatasetLoader;
use crate::gui::nav_panel::NavPanel;
use crate::gui::views::{ExecutiveView, ForecastView, Page, RoiView, SegmentationView};
use egui::{Color32, RichText, ScrollArea, SidePanel};
use log::error;

struct ReadyState {
    nav: NavPanel,
    page: Page,
    executive: ExecutiveView,
    segmentation: SegmentationView,
    forecasting: ForecastView,
    roi: RoiView,
}

enum AppState {
    Ready(Box<ReadyState>),
    /// Atomic load failed; the diagnostic names the offending file.
    LoadFailed(String),
}

/// Main application window.
pub struct DashboardApp {
    state: AppState,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let loader = DatasetLoader::new(&config.data_dir);
        let state = match loader.load() {
            Ok(data) => AppState::Ready(Box::new(ReadyState {
                nav: NavPanel::new(&cc.egui_ctx, loader.data_dir()),
                page: Page::ExecutiveSummary,
                executive: ExecutiveView::new(&data),
                segmentation: SegmentationView::new(&data),
                forecasting: ForecastView::new(&data),
                roi: RoiView::new(&data),
            })),
            Err(e) => {
                error!("dashboard load failed: {}", e);
                AppState::LoadFailed(e.to_string())
            }
        };
        Self { state }
    }

    fn show_fatal_error(ui: &mut egui::Ui, message: &str) {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Failed to load dashboard data")
                        .size(22.0)
                        .strong()
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                ui.add_space(8.0);
                ui.label(RichText::new(message).size(14.0));
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Fix the data directory and restart the application.")
                        .size(12.0)
                        .color(Color32::GRAY),
                );
            });
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let ready = match &mut self.state {
            AppState::Ready(ready) => ready,
            AppState::LoadFailed(message) => {
                let message = message.clone();
                egui::CentralPanel::default().show(ctx, |ui| {
                    Self::show_fatal_error(ui, &message);
                });
                return;
            }
        };

        SidePanel::left("nav_panel")
            .min_width(220.0)
            .max_width(260.0)
            .show(ctx, |ui| {
                ready.nav.show(ui, &mut ready.page);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                match ready.page {
                    Page::ExecutiveSummary => ready.executive.show(ui),
                    Page::CustomerSegmentation => ready.segmentation.show(ui),
                    Page::RevenueForecasting => ready.forecasting.show(ui),
                    Page::RoiAnalysis => ready.roi.show(ui),
                }
            });
        });
    }
}
