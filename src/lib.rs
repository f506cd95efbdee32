//! Incentive Engine
//!
//! This crate calculates service-length incentives for employees uploaded
//! from a spreadsheet. Each employee's start date is normalized, clamped to
//! a configured evaluation window, converted to 30-day months of service,
//! and matched against a tier table supplied by the rule provider.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
