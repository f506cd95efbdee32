//! Evaluation window clipping and service duration.
//!
//! This module clamps an employee's start date to the evaluation window and
//! measures how long they served inside it.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuditStep, EvaluationWindow};

/// Days per month in the fixed 30-day approximation.
///
/// Service is counted as `days / 30`, not in calendar months.
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// The result of clipping a start date to the evaluation window.
#[derive(Debug, Clone)]
pub struct WindowClipResult {
    /// The date service is credited from.
    pub effective_start: NaiveDate,
    /// Whether the start date was moved forward to the window start.
    pub clipped: bool,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// The result of measuring service inside the evaluation window.
#[derive(Debug, Clone)]
pub struct ServiceDurationResult {
    /// Days from the effective start to the window end.
    pub days_worked: i64,
    /// `days_worked / 30`.
    pub months_worked: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Clamps a start date to the beginning of the evaluation window.
///
/// An employee hired before the window is credited from the window start.
/// The window end is not used here: a start after the window end passes
/// through unchanged and yields a non-positive duration downstream.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::clip_to_window;
/// use incentive_engine::models::EvaluationWindow;
/// use chrono::NaiveDate;
///
/// let window = EvaluationWindow::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
/// )
/// .unwrap();
///
/// let early = clip_to_window(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(), &window, 1);
/// assert_eq!(early.effective_start, window.start());
/// assert!(early.clipped);
/// ```
pub fn clip_to_window(
    start_date: NaiveDate,
    window: &EvaluationWindow,
    step_number: u32,
) -> WindowClipResult {
    let clipped = start_date < window.start();
    let effective_start = if clipped { window.start() } else { start_date };

    let reasoning = if clipped {
        format!(
            "Start date {} precedes window start {}; service credited from {}",
            start_date,
            window.start(),
            effective_start
        )
    } else {
        format!(
            "Start date {} is on or after window start {}; no clipping applied",
            start_date,
            window.start()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "window_clip".to_string(),
        rule_name: "Evaluation Window Clip".to_string(),
        input: serde_json::json!({
            "start_date": start_date.to_string(),
            "window_start": window.start().to_string()
        }),
        output: serde_json::json!({
            "effective_start": effective_start.to_string(),
            "clipped": clipped
        }),
        reasoning,
    };

    WindowClipResult {
        effective_start,
        clipped,
        audit_step,
    }
}

/// Measures service from `effective_start` to the window end.
///
/// Dates carry no time of day, so the day difference is already whole and
/// needs no rounding. Months use the fixed 30-day approximation.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::compute_service_duration;
/// use incentive_engine::models::EvaluationWindow;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let window = EvaluationWindow::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
/// )
/// .unwrap();
///
/// let start = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap();
/// let result = compute_service_duration(start, &window, 2);
/// assert_eq!(result.days_worked, 46);
/// assert!(result.months_worked > Decimal::new(153, 2));
/// ```
pub fn compute_service_duration(
    effective_start: NaiveDate,
    window: &EvaluationWindow,
    step_number: u32,
) -> ServiceDurationResult {
    let days_worked = (window.end() - effective_start).num_days();
    let months_worked = Decimal::from(days_worked) / DAYS_PER_MONTH;

    let audit_step = AuditStep {
        step_number,
        rule_id: "service_duration".to_string(),
        rule_name: "Service Duration".to_string(),
        input: serde_json::json!({
            "effective_start": effective_start.to_string(),
            "window_end": window.end().to_string()
        }),
        output: serde_json::json!({
            "days_worked": days_worked,
            "months_worked": months_worked.round_dp(4).normalize().to_string()
        }),
        reasoning: format!(
            "{} days from {} to {} / 30 = {} months",
            days_worked,
            effective_start,
            window.end(),
            months_worked.round_dp(2).normalize()
        ),
    };

    ServiceDurationResult {
        days_worked,
        months_worked,
        audit_step,
    }
}
