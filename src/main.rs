//! Decision Intelligence Dashboard
//!
//! Read-only analytics viewer for revenue forecast scenarios, ROI
//! simulation results and customer segment summaries.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use config::AppConfig;
use eframe::egui;
use gui::DashboardApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = AppConfig::resolve(&base_dir);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Decision Intelligence Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Decision Intelligence Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
