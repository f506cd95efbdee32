//! Incentive tier definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a [`TierTable`](crate::calculation::TierTable) picks a tier for a
/// given service duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// "At least N months" ladder: tiers are tried from the highest
    /// `min_months` down and the first one reached wins. `max_months` is
    /// advisory only.
    #[default]
    Cascading,
    /// Strict buckets: the unique tier with
    /// `min_months <= months < max_months` wins.
    Disjoint,
}

/// A single rule mapping a service-duration range to an incentive amount.
///
/// # Example
///
/// ```
/// use incentive_engine::models::IncentiveTier;
/// use rust_decimal::Decimal;
///
/// let tier = IncentiveTier {
///     id: "four_months".to_string(),
///     min_months: Decimal::from(4),
///     max_months: Decimal::from(12),
///     incentive_amount: Decimal::from(30000),
/// };
/// assert!(tier.contains(Decimal::from(4)));
/// assert!(!tier.contains(Decimal::from(12)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveTier {
    /// Identifier assigned by the rule provider.
    #[serde(default)]
    pub id: String,
    /// Lower bound of the range, inclusive.
    pub min_months: Decimal,
    /// Upper bound of the range, exclusive under the disjoint policy.
    pub max_months: Decimal,
    /// The incentive paid when this tier applies.
    pub incentive_amount: Decimal,
}

impl IncentiveTier {
    /// Returns true if `months` falls in `[min_months, max_months)`.
    pub fn contains(&self, months: Decimal) -> bool {
        months >= self.min_months && months < self.max_months
    }
}
