//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading incentive
//! program configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::calculation::TierTable;
use crate::error::{EngineError, EngineResult};
use crate::models::EvaluationWindow;

use super::types::{IncentiveConfig, ProgramConfig, TiersConfig};

/// Loads and provides access to an incentive program configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory once
/// per run. The resulting window and tier table do not change afterwards.
///
/// # Directory Structure
///
/// ```text
/// config/cna_2024/
/// ├── program.yaml   # Program metadata, evaluation window, resolution policy
/// └── tiers.yaml     # Tier identifier -> { min_months, max_months, incentive_amount }
/// ```
///
/// # Example
///
/// ```no_run
/// use incentive_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/cna_2024")?;
/// println!("Window ends {}", loader.window().end());
/// assert_eq!(loader.tier_table().resolve(Decimal::from(5)), Decimal::from(30000));
/// # Ok::<(), incentive_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: IncentiveConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/cna_2024")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The window ends before it starts (`InvalidWindow`)
    /// - The tiers are empty (`MissingTierCoverage`) or inconsistent (`InvalidTier`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let program = Self::load_yaml::<ProgramConfig>(&path.join("program.yaml"))?;
        let tiers = Self::load_yaml::<TiersConfig>(&path.join("tiers.yaml"))?;

        let window = EvaluationWindow::try_from(program.window)?;

        let tier_table = TierTable::new(tiers.into_tiers(), program.policy)?;

        info!(
            code = %program.code,
            window_start = %window.start(),
            window_end = %window.end(),
            tiers = tier_table.tiers().len(),
            "Incentive program loaded"
        );

        Ok(Self {
            config: IncentiveConfig::new(program, window, tier_table),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &IncentiveConfig {
        &self.config
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramConfig {
        self.config.program()
    }

    /// Returns the configured evaluation window.
    pub fn window(&self) -> &EvaluationWindow {
        self.config.window()
    }

    /// Returns the configured tier table.
    pub fn tier_table(&self) -> &TierTable {
        self.config.tier_table()
    }
}
