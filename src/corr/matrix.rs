//! Pairwise correlation matrix

use crate::data::PriceTable;
use crate::utils::statistics::correlation;
use ndarray::Array2;

/// Symmetric matrix of pairwise correlations between symbol price series
///
/// The diagonal is 1.0. Off-diagonal cells are sample correlations over
/// the rows where both series have finite values, or NAN when fewer than
/// two such rows exist.
#[derive(Debug, Clone)]
pub struct CorrMatrix {
    /// Symbol names, shared by rows and columns
    pub symbols: Vec<String>,
    /// Correlation values (square, symmetric)
    pub values: Array2<f64>,
}

impl CorrMatrix {
    /// Create a CorrMatrix from parts
    pub fn new(symbols: Vec<String>, values: Array2<f64>) -> Self {
        debug_assert_eq!(values.nrows(), symbols.len());
        debug_assert_eq!(values.ncols(), symbols.len());
        Self { symbols, values }
    }

    /// Compute the pairwise correlation matrix of a price table
    pub fn from_prices(table: &PriceTable) -> Self {
        let n = table.n_symbols();
        let mut values = Array2::from_elem((n, n), f64::NAN);

        for i in 0..n {
            values[[i, i]] = 1.0;
            for j in (i + 1)..n {
                let x = table.prices.column(i).to_owned();
                let y = table.prices.column(j).to_owned();
                let c = correlation(&x, &y);
                values[[i, j]] = c;
                values[[j, i]] = c;
            }
        }

        Self {
            symbols: table.symbols.clone(),
            values,
        }
    }

    /// Number of symbols
    pub fn n_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Correlation value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[[row, col]]
    }
}
