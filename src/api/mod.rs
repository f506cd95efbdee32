//! HTTP API module for the Incentive Engine.
//!
//! This module exposes the calculation engine over REST: uploaded sheet
//! rows in, processed records and totals out.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;
