//! Start date normalization.
//!
//! This module converts the raw start date read from a spreadsheet, either a
//! numeric day serial or a `month/day/year` string, into a calendar date.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::RawDate;

/// Days between the spreadsheet epoch (serial 0 = 1899-12-30) and the Unix
/// epoch (1970-01-01).
///
/// Serials are converted as `1970-01-01 + (serial - 25569) days`. Day 0
/// sitting on 1899-12-30 absorbs the 1900 leap-year bug of the 1900 date
/// system, so serials from 61 onward map to the dates spreadsheets display.
pub const SPREADSHEET_UNIX_EPOCH_OFFSET: i64 = 25569;

/// `NaiveDate::num_days_from_ce()` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Normalizes a raw start date to a calendar date.
///
/// - [`RawDate::Serial`] is read as a spreadsheet day serial. Any fractional
///   part is a time of day and is dropped.
/// - [`RawDate::Text`] must be `month/day/year`: exactly three `/`-separated
///   numeric tokens, a 1-2 digit month and day and a 4 digit year. Two digit
///   years and any other layout are rejected instead of guessed at. Text
///   that is itself a finite number is read as a serial, the same way the
///   CSV reader classifies a numeric cell.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDate`] when the value fits neither format
/// or names a day that does not exist.
///
/// # Examples
///
/// ```
/// use incentive_engine::calculation::normalize_date;
/// use incentive_engine::models::RawDate;
/// use chrono::NaiveDate;
///
/// let from_serial = normalize_date(&RawDate::Serial(45292.0)).unwrap();
/// assert_eq!(from_serial, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
///
/// let from_text = normalize_date(&RawDate::Text("1/15/2024".to_string())).unwrap();
/// assert_eq!(from_text, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
///
/// assert!(normalize_date(&RawDate::Text("2024-01-15".to_string())).is_err());
/// ```
pub fn normalize_date(raw: &RawDate) -> EngineResult<NaiveDate> {
    match raw {
        RawDate::Serial(serial) => from_serial(*serial),
        RawDate::Text(text) => match text.trim().parse::<f64>() {
            Ok(serial) if serial.is_finite() => from_serial(serial),
            _ => from_month_day_year(text),
        },
    }
}

fn from_serial(serial: f64) -> EngineResult<NaiveDate> {
    let invalid = |message: &str| EngineError::InvalidDate {
        raw: serial.to_string(),
        message: message.to_string(),
    };

    if !serial.is_finite() {
        return Err(invalid("serial is not a finite number"));
    }
    if serial < 0.0 {
        return Err(invalid("serial precedes the spreadsheet epoch"));
    }

    let whole_days = serial.floor();
    if whole_days > i32::MAX as f64 {
        return Err(invalid("serial is out of range"));
    }

    let days_from_ce =
        UNIX_EPOCH_DAYS_FROM_CE + (whole_days as i64 - SPREADSHEET_UNIX_EPOCH_OFFSET);
    i32::try_from(days_from_ce)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| invalid("serial is out of range"))
}

fn from_month_day_year(text: &str) -> EngineResult<NaiveDate> {
    let invalid = |message: String| EngineError::InvalidDate {
        raw: text.to_string(),
        message,
    };

    let tokens: Vec<&str> = text.trim().split('/').map(str::trim).collect();
    if tokens.len() != 3 {
        return Err(invalid(format!(
            "expected month/day/year, found {} part(s)",
            tokens.len()
        )));
    }

    let month = parse_component(tokens[0], 1..=2, "month").map_err(invalid)?;
    let day = parse_component(tokens[1], 1..=2, "day").map_err(invalid)?;
    let year = parse_component(tokens[2], 4..=4, "year").map_err(invalid)?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| invalid(format!("{}/{}/{} is not a calendar day", month, day, year)))
}

fn parse_component(
    token: &str,
    digits: std::ops::RangeInclusive<usize>,
    field: &str,
) -> Result<u32, String> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{} '{}' is not numeric", field, token));
    }
    if !digits.contains(&token.len()) {
        return Err(format!(
            "{} '{}' must have {} digit(s)",
            field,
            token,
            if digits.start() == digits.end() {
                digits.start().to_string()
            } else {
                format!("{}-{}", digits.start(), digits.end())
            }
        ));
    }
    token
        .parse::<u32>()
        .map_err(|e| format!("{} '{}': {}", field, token, e))
}
