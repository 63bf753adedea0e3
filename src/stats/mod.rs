//! Stats module - summary metric computations

mod aggregator;

pub use aggregator::{Aggregator, MetricError};
