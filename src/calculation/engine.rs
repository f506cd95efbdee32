//! Per-record incentive calculation.
//!
//! This module ties normalization, window clipping, service duration and
//! tier resolution together for a single employee record.

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, EmployeeRecord, EvaluationWindow, IncentiveCalculation,
};

use super::date_normalizer::normalize_date;
use super::tier_table::TierTable;
use super::window_clipper::{clip_to_window, compute_service_duration};

/// Warning code raised when the effective start is on or after the window end.
pub const START_AFTER_WINDOW_END: &str = "START_AFTER_WINDOW_END";

/// Calculates the incentive for one employee record.
///
/// Steps, each recorded in the returned audit trail:
/// 1. Normalize the raw start date.
/// 2. Clip it to the window start.
/// 3. Count days to the window end and divide by 30 for months.
/// 4. Resolve the amount from the tier table.
///
/// A start on or after the window end gives zero or negative months and
/// resolves to the floor tier with a [`START_AFTER_WINDOW_END`] warning; it is
/// not an error.
///
/// The function reads its inputs only and keeps no state, so repeated calls
/// with the same inputs return the same result. The record's own
/// `incentive_amount` is ignored.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] if the record has no start date or
/// the start date cannot be normalized.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::{calculate_incentive, TierTable};
/// use incentive_engine::models::{
///     EmployeeRecord, EvaluationWindow, IncentiveTier, RawDate, ResolutionPolicy,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let window = EvaluationWindow::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
/// )
/// .unwrap();
/// let table = TierTable::new(
///     vec![
///         IncentiveTier {
///             id: "base".into(),
///             min_months: Decimal::ZERO,
///             max_months: Decimal::ONE,
///             incentive_amount: Decimal::from(6000),
///         },
///         IncentiveTier {
///             id: "senior".into(),
///             min_months: Decimal::from(4),
///             max_months: Decimal::from(12),
///             incentive_amount: Decimal::from(30000),
///         },
///     ],
///     ResolutionPolicy::Cascading,
/// )
/// .unwrap();
///
/// let record = EmployeeRecord::new("Ana", Some(RawDate::Text("01/15/2024".into())));
/// let result = calculate_incentive(&record, &window, &table).unwrap();
/// assert_eq!(result.days_worked, 320);
/// assert_eq!(result.amount, Decimal::from(30000));
/// ```
pub fn calculate_incentive(
    record: &EmployeeRecord,
    window: &EvaluationWindow,
    table: &TierTable,
) -> EngineResult<IncentiveCalculation> {
    let raw = record
        .start_date
        .as_ref()
        .ok_or_else(|| EngineError::InvalidDate {
            raw: String::new(),
            message: "start date is missing".to_string(),
        })?;

    let mut steps: Vec<AuditStep> = Vec::with_capacity(4);
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let start_date = normalize_date(raw)?;
    steps.push(AuditStep {
        step_number,
        rule_id: "date_normalization".to_string(),
        rule_name: "Start Date Normalization".to_string(),
        input: serde_json::json!({ "raw": raw }),
        output: serde_json::json!({ "start_date": start_date.to_string() }),
        reasoning: format!("Raw start date '{}' normalized to {}", raw, start_date),
    });
    step_number += 1;

    let clip = clip_to_window(start_date, window, step_number);
    steps.push(clip.audit_step);
    step_number += 1;

    let duration = compute_service_duration(clip.effective_start, window, step_number);
    steps.push(duration.audit_step);
    step_number += 1;

    if duration.days_worked <= 0 {
        warn!(
            employee = %record.name,
            start_date = %start_date,
            window_end = %window.end(),
            "Start date on or after window end; applying floor tier"
        );
        warnings.push(AuditWarning {
            code: START_AFTER_WINDOW_END.to_string(),
            message: format!(
                "Start date {} is on or after window end {}; floor tier applied",
                start_date,
                window.end()
            ),
            severity: "medium".to_string(),
        });
    }

    let tier = table.resolve_tier(duration.months_worked);
    steps.push(AuditStep {
        step_number,
        rule_id: "tier_resolution".to_string(),
        rule_name: "Incentive Tier Resolution".to_string(),
        input: serde_json::json!({
            "months_worked": duration.months_worked.round_dp(4).normalize().to_string(),
            "policy": table.policy()
        }),
        output: serde_json::json!({
            "tier_id": tier.id,
            "incentive_amount": tier.incentive_amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} months resolves to tier '{}' (min {} months): {}",
            duration.months_worked.round_dp(2).normalize(),
            tier.id,
            tier.min_months.normalize(),
            tier.incentive_amount.normalize()
        ),
    });

    debug!(
        employee = %record.name,
        effective_start = %clip.effective_start,
        days_worked = duration.days_worked,
        months_worked = %duration.months_worked.round_dp(2),
        amount = %tier.incentive_amount,
        "Incentive calculated"
    );

    Ok(IncentiveCalculation {
        start_date,
        effective_start: clip.effective_start,
        days_worked: duration.days_worked,
        months_worked: duration.months_worked,
        tier_id: tier.id.clone(),
        amount: tier.incentive_amount,
        steps,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncentiveTier, RawDate, ResolutionPolicy};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn window_2024() -> EvaluationWindow {
        EvaluationWindow::new(make_date(2024, 1, 1), make_date(2024, 11, 30)).unwrap()
    }

    fn tier(id: &str, min: i64, max: i64, amount: i64) -> IncentiveTier {
        IncentiveTier {
            id: id.to_string(),
            min_months: Decimal::from(min),
            max_months: Decimal::from(max),
            incentive_amount: Decimal::from(amount),
        }
    }

    fn ladder() -> TierTable {
        TierTable::new(
            vec![
                tier("under_one_month", 0, 1, 6000),
                tier("one_month", 1, 2, 9000),
                tier("two_months", 2, 3, 12000),
                tier("three_months", 3, 4, 15000),
                tier("four_months", 4, 120, 30000),
            ],
            ResolutionPolicy::Cascading,
        )
        .unwrap()
    }

    fn record(raw: RawDate) -> EmployeeRecord {
        EmployeeRecord::new("Test Employee", Some(raw))
    }

    fn text(s: &str) -> RawDate {
        RawDate::Text(s.to_string())
    }

    fn calculate(raw: RawDate) -> IncentiveCalculation {
        calculate_incentive(&record(raw), &window_2024(), &ladder()).unwrap()
    }

    #[test]
    fn test_mid_january_start_earns_top_tier() {
        let result = calculate(text("01/15/2024"));

        assert_eq!(result.start_date, make_date(2024, 1, 15));
        assert_eq!(result.effective_start, make_date(2024, 1, 15));
        assert_eq!(result.days_worked, 320);
        assert_eq!(result.months_worked.round_dp(2), Decimal::new(1067, 2));
        assert_eq!(result.tier_id, "four_months");
        assert_eq!(result.amount, Decimal::from(30000));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_start_before_window_is_credited_from_window_start() {
        let result = calculate(text("11/01/2023"));

        assert_eq!(result.start_date, make_date(2023, 11, 1));
        assert_eq!(result.effective_start, make_date(2024, 1, 1));
        assert_eq!(result.days_worked, 334);
        assert_eq!(result.amount, Decimal::from(30000));
    }

    #[test]
    fn test_mid_october_start_earns_one_month_tier() {
        let result = calculate(text("10/15/2024"));

        assert_eq!(result.days_worked, 46);
        assert_eq!(result.months_worked.round_dp(2), Decimal::new(153, 2));
        assert_eq!(result.amount, Decimal::from(9000));
    }

    #[test]
    fn test_day_before_window_end_earns_floor() {
        let result = calculate(text("11/29/2024"));

        assert_eq!(result.days_worked, 1);
        assert_eq!(result.amount, Decimal::from(6000));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_serial_window_start_matches_text_window_start() {
        let from_serial = calculate(RawDate::Serial(45292.0));
        let from_text = calculate(text("01/01/2024"));

        assert_eq!(from_serial.start_date, make_date(2024, 1, 1));
        assert_eq!(from_serial.amount, from_text.amount);
        assert_eq!(from_serial.days_worked, from_text.days_worked);
    }

    #[test]
    fn test_start_after_window_end_floors_with_warning() {
        let result = calculate(text("12/15/2024"));

        assert_eq!(result.days_worked, -15);
        assert_eq!(result.amount, Decimal::from(6000));
        assert_eq!(result.tier_id, "under_one_month");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, START_AFTER_WINDOW_END);
    }

    #[test]
    fn test_start_on_window_end_floors_with_warning() {
        let result = calculate(text("11/30/2024"));

        assert_eq!(result.days_worked, 0);
        assert_eq!(result.amount, Decimal::from(6000));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_date_propagates_unchanged() {
        let result = calculate_incentive(&record(text("someday")), &window_2024(), &ladder());
        match result {
            Err(EngineError::InvalidDate { raw, .. }) => assert_eq!(raw, "someday"),
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_start_date_is_invalid() {
        let record = EmployeeRecord::new("Nobody", None);
        let result = calculate_incentive(&record, &window_2024(), &ladder());
        assert!(matches!(result, Err(EngineError::InvalidDate { .. })));
    }

    #[test]
    fn test_audit_steps_are_numbered_in_order() {
        let result = calculate(text("03/01/2024"));

        let ids: Vec<_> = result.steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["date_normalization", "window_clip", "service_duration", "tier_resolution"]
        );
        let numbers: Vec<_> = result.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(
            result.steps[3].output["tier_id"].as_str().unwrap(),
            "four_months"
        );
    }

    #[test]
    fn test_existing_amount_is_ignored() {
        let mut stale = record(text("10/15/2024"));
        stale.incentive_amount = Decimal::from(123);

        let result = calculate_incentive(&stale, &window_2024(), &ladder()).unwrap();
        assert_eq!(result.amount, Decimal::from(9000));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let input = record(text("06/10/2024"));
        let first = calculate_incentive(&input, &window_2024(), &ladder()).unwrap();
        let second = calculate_incentive(&input, &window_2024(), &ladder()).unwrap();
        assert_eq!(first, second);
    }
}
