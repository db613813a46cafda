//! CSV-based decrement table loader
//!
//! Loads per-period decrement and withdrawal rates from a file shaped like
//! data/decrements/sample.csv:
//!
//! ```text
//! t,q,w
//! 0,0.001,0.05
//! 1,0.002,0.07
//! ```

use std::io::Read;
use std::path::Path;

use csv::Reader;
use log::debug;

use super::DecrementTable;
use crate::error::LoadError;

/// Path of the bundled sample table, relative to the crate root
pub const DEFAULT_DECREMENTS_PATH: &str = "data/decrements/sample.csv";

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "t")]
    period: usize,
    #[serde(rename = "q")]
    mortality: f64,
    #[serde(rename = "w")]
    withdrawal: f64,
}

/// Load a decrement table from a CSV file
pub fn load_decrements<P: AsRef<Path>>(path: P) -> Result<DecrementTable, LoadError> {
    let path = path.as_ref();
    debug!("Loading decrement table from {}", path.display());
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load a decrement table from any reader (e.g., string buffer, stdin)
pub fn load_decrements_from_reader<R: Read>(reader: R) -> Result<DecrementTable, LoadError> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: Read>(mut reader: Reader<R>) -> Result<DecrementTable, LoadError> {
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row);
    }

    // Rows may appear in any order but must cover every period exactly once
    rows.sort_by_key(|row| row.period);
    for (position, row) in rows.iter().enumerate() {
        if row.period != position {
            return Err(LoadError::NonContiguousPeriods {
                expected_len: rows.len(),
                position,
                found: row.period,
            });
        }
    }

    let (mortality, withdrawal) = rows
        .into_iter()
        .map(|row| (row.mortality, row.withdrawal))
        .unzip();

    let table = DecrementTable::new(mortality, withdrawal);
    debug!("Loaded {} decrement periods", table.len());
    Ok(table)
}
