//! Correlation matrix, median reordering and top-pair extraction

mod matrix;
mod ranking;

pub use matrix::CorrMatrix;
pub use ranking::{extract_top_pairs, reorder_by_median_correlation, TopPair};
