//! JSON configuration loading

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a JSON file and return its contents verbatim
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open JSON file {}", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON file {}", path.display()))?;
    Ok(value)
}
