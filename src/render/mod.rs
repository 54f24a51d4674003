//! Mean-centered comparison chart grid

mod comparison;

pub use comparison::{colors, comparison_grid, render_comparisons, ChartConfig};
