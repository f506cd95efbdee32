//! CSV record sink.
//!
//! Writes a processed batch back out as `name,start_date,incentive_amount`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::ProcessedRecord;

use super::display::format_display_date;

/// Header row written by [`write_records`].
pub const OUTPUT_HEADER: [&str; 3] = ["name", "start_date", "incentive_amount"];

/// Writes processed records as CSV.
///
/// The start date is written as a `M/D/YYYY` display string when it was
/// normalized, otherwise the raw value is echoed so that the sheet keeps
/// what the user typed. The amount is written as a plain integer. Output
/// read back with [`read_records`](super::read_records) and reprocessed
/// yields the same amounts.
///
/// # Example
///
/// ```
/// use incentive_engine::models::{EmployeeRecord, ProcessedRecord, RawDate, RecordOutcome};
/// use incentive_engine::records::write_records;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut record = EmployeeRecord::new("Ana Cruz", Some(RawDate::Serial(45292.0)));
/// record.incentive_amount = Decimal::from(30000);
/// let processed = ProcessedRecord {
///     record,
///     normalized_start: NaiveDate::from_ymd_opt(2024, 1, 1),
///     outcome: RecordOutcome::Calculated,
/// };
///
/// let mut out = Vec::new();
/// write_records(&mut out, &[processed]).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "name,start_date,incentive_amount\nAna Cruz,1/1/2024,30000\n"
/// );
/// ```
pub fn write_records<W: Write>(writer: W, records: &[ProcessedRecord]) -> EngineResult<()> {
    let sink_error = |e: csv::Error| EngineError::RecordSink {
        message: e.to_string(),
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(OUTPUT_HEADER).map_err(sink_error)?;

    for processed in records {
        let start_date = match (&processed.normalized_start, &processed.record.start_date) {
            (Some(date), _) => format_display_date(*date),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => String::new(),
        };
        let amount = processed.record.incentive_amount.round().to_string();

        csv_writer
            .write_record([
                processed.record.name.as_str(),
                start_date.as_str(),
                amount.as_str(),
            ])
            .map_err(sink_error)?;
    }

    csv_writer.flush().map_err(|e| EngineError::RecordSink {
        message: e.to_string(),
    })
}

/// Writes processed records to a CSV file, creating or truncating it.
pub fn write_records_to_path<P: AsRef<Path>>(
    path: P,
    records: &[ProcessedRecord],
) -> EngineResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| EngineError::RecordSink {
        message: format!("failed to create '{}': {}", path.display(), e),
    })?;
    write_records(file, records)
}
