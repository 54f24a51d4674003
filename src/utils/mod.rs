//! Helper functions and statistics

pub mod statistics;

pub use statistics::{correlation, mean, mean_center, median, percentile};
