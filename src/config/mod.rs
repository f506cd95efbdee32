//! Configuration loading and management for the Incentive Engine.
//!
//! This module provides functionality to load incentive programs from YAML
//! files: program metadata, the evaluation window, the tier resolution
//! policy, and the tier definitions supplied by the rule provider.
//!
//! # Example
//!
//! ```no_run
//! use incentive_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/cna_2024").unwrap();
//! println!("Loaded program: {}", config.program().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{IncentiveConfig, ProgramConfig, TierDefinition, TiersConfig};
