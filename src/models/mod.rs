//! Core data models for the Incentive Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod tier;
mod window;

pub use calculation_result::{
    AuditStep, AuditWarning, BatchSummary, IncentiveBatch, IncentiveCalculation, ProcessedRecord,
    RecordOutcome,
};
pub use employee::{EmployeeRecord, RawDate};
pub use tier::{IncentiveTier, ResolutionPolicy};
pub use window::{EvaluationWindow, WindowBounds};
