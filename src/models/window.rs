//! Evaluation window model.
//!
//! This module contains the [`EvaluationWindow`] type that bounds the period
//! over which service duration is measured.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The fixed calendar period over which service is credited.
///
/// Both bounds are inclusive calendar dates. The window is validated on
/// construction so that `start <= end` always holds.
///
/// # Example
///
/// ```
/// use incentive_engine::models::EvaluationWindow;
/// use chrono::NaiveDate;
///
/// let window = EvaluationWindow::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
/// )
/// .unwrap();
///
/// assert!(window.contains_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
/// assert_eq!(window.length_days(), 334);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds", into = "WindowBounds")]
pub struct EvaluationWindow {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unvalidated wire form of an [`EvaluationWindow`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowBounds {
    /// The first day of the window.
    pub start: NaiveDate,
    /// The last day of the window.
    pub end: NaiveDate,
}

impl EvaluationWindow {
    /// Creates a window, rejecting one that ends before it starts.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The first day of the window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last day of the window; service is measured up to this date.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Checks if a date falls within the window, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days from window start to window end.
    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl TryFrom<WindowBounds> for EvaluationWindow {
    type Error = EngineError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl From<EvaluationWindow> for WindowBounds {
    fn from(window: EvaluationWindow) -> Self {
        Self {
            start: window.start,
            end: window.end,
        }
    }
}
