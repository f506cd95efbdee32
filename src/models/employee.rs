//! Employee record model and raw start-date representation.
//!
//! Records arrive from a spreadsheet source with the start date still in
//! whatever shape the sheet stored it: a numeric date serial or a text cell.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A start date exactly as read from the record source.
///
/// Spreadsheets store dates either as a numeric day serial or as text,
/// depending on how the cell was formatted. Both are kept verbatim until
/// the engine normalizes them.
///
/// # Example
///
/// ```
/// use incentive_engine::models::RawDate;
///
/// let serial: RawDate = serde_json::from_str("45292").unwrap();
/// assert_eq!(serial, RawDate::Serial(45292.0));
///
/// let text: RawDate = serde_json::from_str("\"01/15/2024\"").unwrap();
/// assert_eq!(text, RawDate::Text("01/15/2024".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// A spreadsheet day serial (1900 date system).
    Serial(f64),
    /// A textual date, expected as `month/day/year`.
    Text(String),
}

impl RawDate {
    /// Returns true when the value carries no date at all.
    ///
    /// Blank or whitespace-only text counts as empty; every serial is
    /// considered present.
    pub fn is_blank(&self) -> bool {
        match self {
            RawDate::Serial(_) => false,
            RawDate::Text(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for RawDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDate::Serial(serial) => write!(f, "{}", serial),
            RawDate::Text(text) => f.write_str(text),
        }
    }
}

/// An employee row as supplied by the record source.
///
/// `incentive_amount` is a derived value: it is zero on ingestion and is
/// always recomputable from `start_date`, the evaluation window and the
/// tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// The employee's name as it appears in the sheet.
    pub name: String,
    /// The unparsed start date, if the cell was filled in.
    #[serde(default)]
    pub start_date: Option<RawDate>,
    /// The calculated incentive, zero until calculated.
    #[serde(default)]
    pub incentive_amount: Decimal,
}

impl EmployeeRecord {
    /// Creates a freshly ingested record with a zero incentive.
    ///
    /// # Examples
    ///
    /// ```
    /// use incentive_engine::models::{EmployeeRecord, RawDate};
    /// use rust_decimal::Decimal;
    ///
    /// let record = EmployeeRecord::new("Ana Cruz", Some(RawDate::Serial(45292.0)));
    /// assert_eq!(record.incentive_amount, Decimal::ZERO);
    /// assert!(record.has_start_date());
    /// ```
    pub fn new(name: impl Into<String>, start_date: Option<RawDate>) -> Self {
        Self {
            name: name.into(),
            start_date,
            incentive_amount: Decimal::ZERO,
        }
    }

    /// Returns true if the record carries a non-blank start date.
    pub fn has_start_date(&self) -> bool {
        self.start_date.as_ref().is_some_and(|raw| !raw.is_blank())
    }
}
