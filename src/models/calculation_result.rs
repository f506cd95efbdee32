//! Calculation result models for the Incentive Engine.
//!
//! This module contains the [`IncentiveCalculation`] produced for a single
//! record, and the [`IncentiveBatch`] produced for a whole upload, together
//! with the audit structures that explain each decision.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeRecord;

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use incentive_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "window_clip".to_string(),
///     rule_name: "Evaluation Window Clip".to_string(),
///     input: serde_json::json!({ "start_date": "2023-11-01" }),
///     output: serde_json::json!({ "effective_start": "2024-01-01" }),
///     reasoning: "Start precedes window; credited from 2024-01-01".to_string(),
/// };
/// assert_eq!(step.rule_id, "window_clip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that were produced under a policy decision and
/// may deserve a second look, without failing the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The full result of calculating one employee's incentive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveCalculation {
    /// The normalized start date.
    pub start_date: NaiveDate,
    /// The start date after clamping to the evaluation window.
    pub effective_start: NaiveDate,
    /// Whole days from the effective start to the window end. May be
    /// zero or negative for starts on or after the window end.
    pub days_worked: i64,
    /// `days_worked / 30`.
    pub months_worked: Decimal,
    /// Identifier of the tier that produced the amount.
    pub tier_id: String,
    /// The resolved incentive.
    pub amount: Decimal,
    /// Ordered record of each rule applied.
    pub steps: Vec<AuditStep>,
    /// Policy warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

/// What happened to a record during batch processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// The incentive was calculated normally.
    Calculated,
    /// The record had no start date; it was assigned zero without calculation.
    Skipped,
    /// The start date could not be normalized. The record is assigned zero
    /// and excluded from batch totals.
    InvalidDate {
        /// Why the date was rejected.
        message: String,
    },
}

/// A record after batch processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    /// The original record with `incentive_amount` populated.
    #[serde(flatten)]
    pub record: EmployeeRecord,
    /// The normalized start date, when one could be derived.
    pub normalized_start: Option<NaiveDate>,
    /// How the record was handled.
    pub outcome: RecordOutcome,
}

impl ProcessedRecord {
    /// Returns true if the record contributes to batch totals.
    pub fn is_calculated(&self) -> bool {
        self.outcome == RecordOutcome::Calculated
    }
}

/// Aggregated counts and totals for a processed batch.
///
/// # Example
///
/// ```
/// use incentive_engine::models::BatchSummary;
/// use rust_decimal::Decimal;
///
/// let summary = BatchSummary::default();
/// assert_eq!(summary.total, 0);
/// assert_eq!(summary.total_amount, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of records in the batch.
    pub total: usize,
    /// Records with a calculated incentive.
    pub calculated: usize,
    /// Records skipped for lack of a start date.
    pub skipped: usize,
    /// Records flagged with an invalid start date.
    pub invalid: usize,
    /// Sum of incentives over calculated records only.
    pub total_amount: Decimal,
}

/// The processed form of an uploaded batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncentiveBatch {
    /// Records in input order.
    pub records: Vec<ProcessedRecord>,
    /// Counts and totals.
    pub summary: BatchSummary,
}

impl IncentiveBatch {
    /// Returns true if the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records flagged with invalid start dates.
    pub fn invalid_records(&self) -> impl Iterator<Item = &ProcessedRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, RecordOutcome::InvalidDate { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawDate;

    fn processed(name: &str, amount: i64, outcome: RecordOutcome) -> ProcessedRecord {
        let mut record = EmployeeRecord::new(name, Some(RawDate::Text("1/1/2024".to_string())));
        record.incentive_amount = Decimal::from(amount);
        ProcessedRecord {
            record,
            normalized_start: NaiveDate::from_ymd_opt(2024, 1, 1),
            outcome,
        }
    }

    #[test]
    fn test_record_outcome_serialization() {
        assert_eq!(
            serde_json::to_value(RecordOutcome::Calculated).unwrap(),
            serde_json::json!({ "status": "calculated" })
        );
        assert_eq!(
            serde_json::to_value(RecordOutcome::InvalidDate {
                message: "bad".to_string()
            })
            .unwrap(),
            serde_json::json!({ "status": "invalid_date", "message": "bad" })
        );
    }

    #[test]
    fn test_processed_record_flattens_employee_fields() {
        let record = processed("Ana", 30000, RecordOutcome::Calculated);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["name"], "Ana");
        assert_eq!(json["start_date"], "1/1/2024");
        assert_eq!(json["incentive_amount"], "30000");
        assert_eq!(json["normalized_start"], "2024-01-01");
        assert_eq!(json["outcome"]["status"], "calculated");
    }

    #[test]
    fn test_is_calculated() {
        assert!(processed("A", 1, RecordOutcome::Calculated).is_calculated());
        assert!(!processed("B", 0, RecordOutcome::Skipped).is_calculated());
    }

    #[test]
    fn test_invalid_records_filter() {
        let batch = IncentiveBatch {
            records: vec![
                processed("A", 9000, RecordOutcome::Calculated),
                processed(
                    "B",
                    0,
                    RecordOutcome::InvalidDate {
                        message: "bad".to_string(),
                    },
                ),
                processed("C", 0, RecordOutcome::Skipped),
            ],
            summary: BatchSummary::default(),
        };

        let invalid: Vec<_> = batch.invalid_records().map(|r| r.record.name.as_str()).collect();
        assert_eq!(invalid, vec!["B"]);
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "START_AFTER_WINDOW_END".to_string(),
            message: "floored".to_string(),
            severity: "medium".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["code"], "START_AFTER_WINDOW_END");
        assert_eq!(json["severity"], "medium");
    }
}
