//! Error types for the Incentive Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating incentives.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Incentive Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use incentive_engine::error::EngineError;
///
/// let error = EngineError::InvalidDate {
///     raw: "31/31/2024".to_string(),
///     message: "month out of range".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid date '31/31/2024': month out of range");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A raw start date could not be normalized to a calendar date.
    #[error("Invalid date '{raw}': {message}")]
    InvalidDate {
        /// The raw value as received from the record source.
        raw: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The tier table has nothing to fall back on.
    #[error("Tier table has no coverage: {message}")]
    MissingTierCoverage {
        /// A description of the coverage gap.
        message: String,
    },

    /// A tier definition was inconsistent.
    #[error("Invalid tier '{tier_id}': {message}")]
    InvalidTier {
        /// The identifier of the offending tier.
        tier_id: String,
        /// A description of what made the tier invalid.
        message: String,
    },

    /// The evaluation window ends before it starts.
    #[error("Invalid evaluation window: {start} is after {end}")]
    InvalidWindow {
        /// The configured window start.
        start: NaiveDate,
        /// The configured window end.
        end: NaiveDate,
    },

    /// A row from the record source could not be read.
    #[error("Record source error at line {line}: {message}")]
    RecordSource {
        /// The 1-based line number in the source, header included.
        line: u64,
        /// A description of the failure.
        message: String,
    },

    /// Processed records could not be written to the sink.
    #[error("Record sink error: {message}")]
    RecordSink {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
