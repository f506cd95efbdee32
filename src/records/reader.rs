//! CSV record source.
//!
//! Reads an employee sheet exported as CSV. The first row is a header and
//! is skipped; after that, column 0 is the employee name and column 1 the
//! start date as the sheet stored it. Any further columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, RawDate};

/// Reads employee records from CSV.
///
/// A numeric start-date cell becomes [`RawDate::Serial`], other non-empty
/// text becomes [`RawDate::Text`], and an empty cell becomes `None`. Rows
/// where every cell is empty are dropped.
///
/// # Errors
///
/// Returns [`EngineError::RecordSource`] with the offending line number for
/// malformed CSV or a row without a name.
///
/// # Example
///
/// ```
/// use incentive_engine::models::RawDate;
/// use incentive_engine::records::read_records;
///
/// let csv = "Name,Start Date\nAna Cruz,45292\nJose Reyes,01/15/2024\n";
/// let records = read_records(csv.as_bytes()).unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].start_date, Some(RawDate::Serial(45292.0)));
/// assert_eq!(records[1].start_date, Some(RawDate::Text("01/15/2024".to_string())));
/// ```
pub fn read_records<R: Read>(reader: R) -> EngineResult<Vec<EmployeeRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        // Header is line 1
        let fallback_line = index as u64 + 2;
        let row = result.map_err(|e| EngineError::RecordSource {
            line: e.position().map(|p| p.line()).unwrap_or(fallback_line),
            message: e.to_string(),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);

        if row.iter().all(str::is_empty) {
            continue;
        }

        let name = row.get(0).unwrap_or_default();
        if name.is_empty() {
            return Err(EngineError::RecordSource {
                line,
                message: "row has no employee name".to_string(),
            });
        }

        let start_date = row.get(1).and_then(classify_cell);
        records.push(EmployeeRecord::new(name, start_date));
    }

    Ok(records)
}

/// Reads employee records from a CSV file path.
pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> EngineResult<Vec<EmployeeRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| EngineError::RecordSource {
        line: 0,
        message: format!("failed to open '{}': {}", path.display(), e),
    })?;
    read_records(file)
}

fn classify_cell(cell: &str) -> Option<RawDate> {
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(serial) if serial.is_finite() => Some(RawDate::Serial(serial)),
        _ => Some(RawDate::Text(cell.to_string())),
    }
}
