//! Timestamp-indexed price table

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ndarray::{Array1, Array2};
use std::path::Path;

/// Container for multi-symbol price data
///
/// Rows are indexed by date (ascending, unique), columns are stock symbols.
/// Missing cells are stored as NAN and skipped by correlation.
#[derive(Debug, Clone)]
pub struct PriceTable {
    /// Symbol names, one per column
    pub symbols: Vec<String>,
    /// Dates (common index across all symbols)
    pub timestamps: Vec<NaiveDate>,
    /// Price matrix (rows = timestamps, cols = symbols)
    pub prices: Array2<f64>,
}

impl PriceTable {
    /// Create a new PriceTable from parts
    pub fn new(symbols: Vec<String>, timestamps: Vec<NaiveDate>, prices: Array2<f64>) -> Self {
        Self {
            symbols,
            timestamps,
            prices,
        }
    }

    /// Load a price table from CSV
    ///
    /// The first column is the date index (`YYYY-MM-DD`), the remaining
    /// columns are one symbol each. Empty cells become NAN; any other
    /// unparseable cell is an error.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open price CSV {}", path.display()))?;

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let symbols: Vec<String> = headers.into_iter().skip(1).collect();

        let mut timestamps = Vec::new();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            let date: NaiveDate = record[0]
                .parse()
                .with_context(|| format!("Bad date index '{}' in {}", &record[0], path.display()))?;
            timestamps.push(date);

            let row: Vec<f64> = record
                .iter()
                .skip(1)
                .map(|cell| {
                    if cell.is_empty() {
                        Ok(f64::NAN)
                    } else {
                        cell.parse::<f64>()
                            .with_context(|| format!("Non-numeric price '{}' on {}", cell, date))
                    }
                })
                .collect::<Result<_>>()?;
            rows.push(row);
        }

        let n_timestamps = timestamps.len();
        let n_symbols = symbols.len();
        let mut prices = Array2::zeros((n_timestamps, n_symbols));

        for (i, row) in rows.iter().enumerate() {
            for (j, &price) in row.iter().enumerate() {
                prices[[i, j]] = price;
            }
        }

        tracing::info!(
            "Loaded {} rows x {} symbols from {}",
            n_timestamps,
            n_symbols,
            path.display()
        );

        Ok(Self {
            symbols,
            timestamps,
            prices,
        })
    }

    /// Number of symbols
    pub fn n_symbols(&self) -> usize {
        self.symbols.len()
    }

    /// Number of time periods
    pub fn n_periods(&self) -> usize {
        self.timestamps.len()
    }

    /// Get the price series for a specific symbol
    pub fn symbol_prices(&self, symbol: &str) -> Option<Array1<f64>> {
        let idx = self.symbols.iter().position(|s| s == symbol)?;
        Some(self.prices.column(idx).to_owned())
    }

    /// Index of the first row at or after the given date
    pub fn first_row_from(&self, start: NaiveDate) -> usize {
        self.timestamps.partition_point(|&t| t < start)
    }

    /// Get the price series for a symbol restricted to rows from `start` onward
    pub fn symbol_prices_from(&self, symbol: &str, start: NaiveDate) -> Option<Array1<f64>> {
        let col = self.symbols.iter().position(|s| s == symbol)?;
        let row0 = self.first_row_from(start);
        Some(self.prices.column(col).slice(ndarray::s![row0..]).to_owned())
    }

    /// Dates from `start` onward, aligned with `symbol_prices_from`
    pub fn timestamps_from(&self, start: NaiveDate) -> &[NaiveDate] {
        &self.timestamps[self.first_row_from(start)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_table() -> PriceTable {
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        let timestamps = vec![date("2023-01-02"), date("2023-01-03"), date("2023-01-04")];
        let prices = array![[130.0, 240.0], [131.5, 238.0], [129.0, 242.0]];
        PriceTable::new(symbols, timestamps, prices)
    }

    #[test]
    fn test_price_table_creation() {
        let table = sample_table();
        assert_eq!(table.n_symbols(), 2);
        assert_eq!(table.n_periods(), 3);
    }

    #[test]
    fn test_symbol_prices() {
        let table = sample_table();
        let aapl = table.symbol_prices("AAPL").unwrap();
        assert_eq!(aapl.len(), 3);
        assert_eq!(aapl[0], 130.0);
        assert_eq!(aapl[2], 129.0);
        assert!(table.symbol_prices("TSLA").is_none());
    }

    #[test]
    fn test_slice_from_date() {
        let table = sample_table();
        let sliced = table.symbol_prices_from("MSFT", date("2023-01-03")).unwrap();
        assert_eq!(sliced.len(), 2);
        assert_eq!(sliced[0], 238.0);
        assert_eq!(table.timestamps_from(date("2023-01-03")).len(), 2);

        // before the first row the full series comes back
        assert_eq!(table.first_row_from(date("2022-12-01")), 0);
        // after the last row the slice is empty
        assert_eq!(table.first_row_from(date("2023-02-01")), 3);
    }

    #[test]
    fn test_from_csv() {
        let dir = std::env::temp_dir().join("corr_pairs_price_table_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prices.csv");
        std::fs::write(
            &path,
            "date,AAPL,MSFT\n2023-01-02,130.0,240.0\n2023-01-03,,238.0\n",
        )
        .unwrap();

        let table = PriceTable::from_csv(&path).unwrap();
        assert_eq!(table.symbols, vec!["AAPL", "MSFT"]);
        assert_eq!(table.n_periods(), 2);
        assert!(table.prices[[1, 0]].is_nan());
        assert_eq!(table.prices[[1, 1]], 238.0);
    }

    #[test]
    fn test_from_csv_rejects_garbage() {
        let dir = std::env::temp_dir().join("corr_pairs_price_table_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.csv");
        std::fs::write(&path, "date,AAPL\n2023-01-02,abc\n").unwrap();
        assert!(PriceTable::from_csv(&path).is_err());
    }
}
