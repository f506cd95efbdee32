//! Calculation logic for the Incentive Engine.
//!
//! This module contains the calculation functions for determining an
//! employee's incentive: start date normalization, clipping to the
//! evaluation window, service duration in 30-day months, tier resolution,
//! the per-record engine, and batch processing across an upload.

mod batch;
mod date_normalizer;
mod engine;
mod tier_table;
mod window_clipper;

pub use batch::process_all;
pub use date_normalizer::{SPREADSHEET_UNIX_EPOCH_OFFSET, normalize_date};
pub use engine::{START_AFTER_WINDOW_END, calculate_incentive};
pub use tier_table::TierTable;
pub use window_clipper::{
    DAYS_PER_MONTH, ServiceDurationResult, WindowClipResult, clip_to_window,
    compute_service_duration,
};
