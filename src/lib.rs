//! # Corr Pairs - Stock Correlation Pair Ranking
//!
//! This library computes pairwise correlations among stock price series,
//! ranks the most (anti-)correlated pairs after outlier trimming, and
//! renders comparison charts for the selected pairs.
//!
//! ## Modules
//!
//! - `data` - Price table loading and JSON configuration
//! - `corr` - Correlation matrix, median reordering and top-pair extraction
//! - `render` - Mean-centered comparison chart grid
//! - `utils` - Helper functions and statistics

pub mod corr;
pub mod data;
pub mod render;
pub mod utils;

pub use corr::{extract_top_pairs, reorder_by_median_correlation, CorrMatrix, TopPair};
pub use data::{load_json, PriceTable};
pub use render::{render_comparisons, ChartConfig};
