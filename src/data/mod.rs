//! Price table loading and JSON configuration

mod config;
mod price_table;

pub use config::load_json;
pub use price_table::PriceTable;
