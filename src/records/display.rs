//! Display formatting for exported and on-screen values.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Formats a date as `M/D/YYYY` without leading zeros.
///
/// This is the same layout [`normalize_date`](crate::calculation::normalize_date)
/// accepts, so exported dates read back unchanged.
///
/// # Example
///
/// ```
/// use incentive_engine::records::format_display_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// assert_eq!(format_display_date(date), "1/5/2024");
/// ```
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Formats an amount as a whole number with comma thousands separators.
///
/// # Example
///
/// ```
/// use incentive_engine::records::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::from(30000)), "30,000");
/// assert_eq!(format_amount(Decimal::from(950)), "950");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round();
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
