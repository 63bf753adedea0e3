//! Data module - CSV loading and typed tables

mod loader;
mod tables;

pub use loader::{parse_day_first, DataError, DatasetLoader};
pub use tables::{Dashboard, ForecastRow, RoiRow, SegmentRow};
