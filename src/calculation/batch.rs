//! Batch processing of uploaded employee records.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::EngineError;
use crate::models::{
    BatchSummary, EmployeeRecord, EvaluationWindow, IncentiveBatch, ProcessedRecord, RecordOutcome,
};

use super::engine::calculate_incentive;
use super::tier_table::TierTable;

/// Calculates incentives for every record in a batch.
///
/// Returns a new collection in input order; `records` itself is left
/// untouched. Per-record policy:
///
/// - No start date (absent or blank): amount zero, [`RecordOutcome::Skipped`],
///   the engine is not invoked.
/// - Unparseable start date: amount zero, [`RecordOutcome::InvalidDate`],
///   excluded from `summary.total_amount`. The rest of the batch proceeds.
/// - Otherwise: the calculated amount, [`RecordOutcome::Calculated`].
///
/// An empty input yields an empty batch.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::{process_all, TierTable};
/// use incentive_engine::models::{EvaluationWindow, IncentiveTier, ResolutionPolicy};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let window = EvaluationWindow::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
/// )
/// .unwrap();
/// let table = TierTable::new(
///     vec![IncentiveTier {
///         id: "flat".into(),
///         min_months: Decimal::ZERO,
///         max_months: Decimal::ONE,
///         incentive_amount: Decimal::from(6000),
///     }],
///     ResolutionPolicy::Cascading,
/// )
/// .unwrap();
///
/// let batch = process_all(&[], &window, &table);
/// assert!(batch.is_empty());
/// assert_eq!(batch.summary.total, 0);
/// ```
pub fn process_all(
    records: &[EmployeeRecord],
    window: &EvaluationWindow,
    table: &TierTable,
) -> IncentiveBatch {
    let mut summary = BatchSummary {
        total: records.len(),
        ..BatchSummary::default()
    };

    let processed: Vec<ProcessedRecord> = records
        .iter()
        .map(|record| process_record(record, window, table))
        .inspect(|p| match &p.outcome {
            RecordOutcome::Calculated => {
                summary.calculated += 1;
                summary.total_amount += p.record.incentive_amount;
            }
            RecordOutcome::Skipped => summary.skipped += 1,
            RecordOutcome::InvalidDate { .. } => summary.invalid += 1,
        })
        .collect();

    info!(
        total = summary.total,
        calculated = summary.calculated,
        skipped = summary.skipped,
        invalid = summary.invalid,
        total_amount = %summary.total_amount,
        "Batch processed"
    );

    IncentiveBatch {
        records: processed,
        summary,
    }
}

fn process_record(
    record: &EmployeeRecord,
    window: &EvaluationWindow,
    table: &TierTable,
) -> ProcessedRecord {
    let mut output = record.clone();

    if !record.has_start_date() {
        output.incentive_amount = Decimal::ZERO;
        return ProcessedRecord {
            record: output,
            normalized_start: None,
            outcome: RecordOutcome::Skipped,
        };
    }

    match calculate_incentive(record, window, table) {
        Ok(calculation) => {
            output.incentive_amount = calculation.amount;
            ProcessedRecord {
                record: output,
                normalized_start: Some(calculation.start_date),
                outcome: RecordOutcome::Calculated,
            }
        }
        Err(err) => {
            warn!(employee = %record.name, error = %err, "Record excluded from batch totals");
            output.incentive_amount = Decimal::ZERO;
            let message = match err {
                EngineError::InvalidDate { message, .. } => message,
                other => other.to_string(),
            };
            ProcessedRecord {
                record: output,
                normalized_start: None,
                outcome: RecordOutcome::InvalidDate { message },
            }
        }
    }
}
