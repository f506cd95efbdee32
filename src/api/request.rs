//! Request types for the Incentive Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{EmployeeRecord, WindowBounds};

/// Request body for the `/calculate` endpoint.
///
/// Carries the rows of an uploaded sheet, header already removed. The
/// evaluation window defaults to the loaded program's window.
///
/// # Example
///
/// ```
/// use incentive_engine::api::CalculationRequest;
///
/// let request: CalculationRequest = serde_json::from_str(
///     r#"{ "records": [{ "name": "Ana", "start_date": 45292 }] }"#,
/// )
/// .unwrap();
/// assert_eq!(request.records.len(), 1);
/// assert!(request.window.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee rows to calculate.
    pub records: Vec<EmployeeRecord>,
    /// Overrides the program's evaluation window for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowBounds>,
}
