//! Median-based reordering and top-pair extraction

use crate::corr::CorrMatrix;
use crate::utils::statistics::{median, percentile};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One (anti-)correlated symbol pair
///
/// `symbol_1 < symbol_2` lexicographically, so the two symmetric matrix
/// cells collapse to a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPair {
    pub symbol_1: String,
    pub symbol_2: String,
    pub corr: f64,
}

/// Reorder a correlation matrix by each symbol's median correlation
///
/// Medians are taken over the symbol's full matrix column (diagonal
/// included, NANs skipped). The same permutation is applied to rows and
/// columns, so symmetry and the value multiset are preserved. Ties keep
/// input order.
pub fn reorder_by_median_correlation(matrix: &CorrMatrix) -> CorrMatrix {
    let n = matrix.n_symbols();

    let medians: Vec<f64> = (0..n)
        .map(|j| median(&matrix.values.column(j).to_vec()))
        .collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| medians[a].total_cmp(&medians[b]));

    let symbols: Vec<String> = order.iter().map(|&i| matrix.symbols[i].clone()).collect();
    let mut values = Array2::from_elem((n, n), f64::NAN);
    for (row, &i) in order.iter().enumerate() {
        for (col, &j) in order.iter().enumerate() {
            values[[row, col]] = matrix.values[[i, j]];
        }
    }

    CorrMatrix::new(symbols, values)
}

/// Extract the most negative and most positive symbol pairs
///
/// Flattens the matrix, drops NANs and self-correlations (values of 1.0),
/// trims values outside the inclusive
/// [`outlier_percentile`, 100 - `outlier_percentile`] percentile range,
/// then keeps the lowest and highest `2 * num_top_corrs` values as
/// candidates. The factor of two absorbs each unordered pair appearing in
/// both symmetric cells. Returns at most `num_top_corrs` negative and
/// `num_top_corrs` positive pairs, sorted ascending by correlation;
/// degenerate input yields a short or empty result rather than an error.
pub fn extract_top_pairs(
    matrix: &CorrMatrix,
    num_top_corrs: usize,
    outlier_percentile: f64,
) -> Vec<TopPair> {
    // Flatten, drop NANs and corr >= 1 (self-pairs)
    let mut corrs: Vec<f64> = matrix
        .values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v < 1.0)
        .collect();
    corrs.sort_by(|a, b| a.total_cmp(b));

    if corrs.is_empty() {
        return Vec::new();
    }

    // Trim outlier quantiles
    let min_corr = percentile(&corrs, outlier_percentile);
    let max_corr = percentile(&corrs, 100.0 - outlier_percentile);
    corrs.retain(|v| *v >= min_corr && *v <= max_corr);

    if corrs.is_empty() {
        return Vec::new();
    }

    // Candidate value set: lowest and highest 2N, duplicates collapsed
    let take = (2 * num_top_corrs).min(corrs.len());
    let mut candidates: Vec<f64> = corrs[..take]
        .iter()
        .chain(corrs[corrs.len() - take..].iter())
        .copied()
        .collect();
    candidates.sort_by(|a, b| a.total_cmp(b));
    candidates.dedup();

    // Scan matrix cells for the candidate values; lexicographic pair key,
    // last-seen value wins for the duplicate symmetric cell
    let mut pairs: BTreeMap<(String, String), f64> = BTreeMap::new();
    let n = matrix.n_symbols();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let v = matrix.values[[i, j]];
            if !v.is_finite() || candidates.binary_search_by(|c| c.total_cmp(&v)).is_err() {
                continue;
            }
            let (s1, s2) = if matrix.symbols[i] < matrix.symbols[j] {
                (matrix.symbols[i].clone(), matrix.symbols[j].clone())
            } else {
                (matrix.symbols[j].clone(), matrix.symbols[i].clone())
            };
            pairs.insert((s1, s2), v);
        }
    }

    let mut result: Vec<TopPair> = pairs
        .into_iter()
        .map(|((symbol_1, symbol_2), corr)| TopPair {
            symbol_1,
            symbol_2,
            corr,
        })
        .collect();
    result.sort_by(|a, b| a.corr.total_cmp(&b.corr));
    result
}
