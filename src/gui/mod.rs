//! GUI module - application window and page views

mod app;
mod format;
mod nav_panel;
mod views;

pub use app::DashboardApp;
pub use views::Page;
