//! Configuration types for incentive programs.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calculation::TierTable;
use crate::models::{EvaluationWindow, IncentiveTier, ResolutionPolicy, WindowBounds};

/// Metadata and run parameters for an incentive program, from `program.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// A short program code (e.g., "CNA-2024").
    pub code: String,
    /// The human-readable name of the program.
    pub name: String,
    /// The period over which service is measured, as written in the file.
    pub window: WindowBounds,
    /// How tiers are matched against service duration.
    #[serde(default)]
    pub policy: ResolutionPolicy,
}

/// A tier as stored by the rule provider, keyed by its identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct TierDefinition {
    /// Lower bound in months, inclusive.
    pub min_months: Decimal,
    /// Upper bound in months.
    pub max_months: Decimal,
    /// Incentive paid for this tier.
    pub incentive_amount: Decimal,
}

/// Tiers configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    /// Map of tier identifier to tier definition.
    pub tiers: HashMap<String, TierDefinition>,
}

impl TiersConfig {
    /// Converts the keyed definitions into tiers carrying their identifiers.
    pub fn into_tiers(self) -> Vec<IncentiveTier> {
        self.tiers
            .into_iter()
            .map(|(id, def)| IncentiveTier {
                id,
                min_months: def.min_months,
                max_months: def.max_months,
                incentive_amount: def.incentive_amount,
            })
            .collect()
    }
}

/// The complete configuration for one calculation run.
///
/// Both the window and the tier table are immutable once loaded.
#[derive(Debug, Clone)]
pub struct IncentiveConfig {
    program: ProgramConfig,
    window: EvaluationWindow,
    tier_table: TierTable,
}

impl IncentiveConfig {
    /// Creates a new IncentiveConfig from its component parts.
    pub fn new(program: ProgramConfig, window: EvaluationWindow, tier_table: TierTable) -> Self {
        Self {
            program,
            window,
            tier_table,
        }
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramConfig {
        &self.program
    }

    /// Returns the evaluation window.
    pub fn window(&self) -> &EvaluationWindow {
        &self.window
    }

    /// Returns the tier table.
    pub fn tier_table(&self) -> &TierTable {
        &self.tier_table
    }
}
