//! Spreadsheet interchange for the Incentive Engine.
//!
//! This module is the boundary with the employee sheet: reading uploaded
//! rows into [`EmployeeRecord`](crate::models::EmployeeRecord)s, writing a
//! processed batch back out, and formatting values for display.

mod display;
mod reader;
mod writer;

pub use display::{format_amount, format_display_date};
pub use reader::{read_records, read_records_from_path};
pub use writer::{OUTPUT_HEADER, write_records, write_records_to_path};
