//! Tier table resolution.
//!
//! This module provides [`TierTable`], the single place where a service
//! duration in months is turned into an incentive amount.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{IncentiveTier, ResolutionPolicy};

/// An ordered, immutable set of incentive tiers.
///
/// Tiers are stored sorted by `min_months` descending. The tier with the
/// lowest `min_months` is the floor: it applies whenever no other tier
/// matches, including negative durations. A table therefore always
/// resolves, and building an empty one fails with
/// [`EngineError::MissingTierCoverage`].
///
/// `TierTable` is `Send + Sync` and never mutated by resolution, so a single
/// table can be shared across threads and batches.
///
/// # Example
///
/// ```
/// use incentive_engine::calculation::TierTable;
/// use incentive_engine::models::{IncentiveTier, ResolutionPolicy};
/// use rust_decimal::Decimal;
///
/// let tier = |id: &str, min: i64, max: i64, amount: i64| IncentiveTier {
///     id: id.to_string(),
///     min_months: Decimal::from(min),
///     max_months: Decimal::from(max),
///     incentive_amount: Decimal::from(amount),
/// };
///
/// let table = TierTable::new(
///     vec![tier("base", 0, 1, 6000), tier("one", 1, 2, 9000), tier("two", 2, 12, 12000)],
///     ResolutionPolicy::Cascading,
/// )
/// .unwrap();
///
/// assert_eq!(table.resolve(Decimal::new(5, 1)), Decimal::from(6000));
/// assert_eq!(table.resolve(Decimal::from(1)), Decimal::from(9000));
/// assert_eq!(table.resolve(Decimal::from(30)), Decimal::from(12000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<IncentiveTier>,
    policy: ResolutionPolicy,
}

impl TierTable {
    /// Builds a table from tiers supplied by the rule provider.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingTierCoverage`] if `tiers` is empty.
    /// - [`EngineError::InvalidTier`] if a tier has negative bounds or
    ///   amount, `min_months > max_months`, or shares its `min_months`
    ///   with another tier.
    /// - [`EngineError::InvalidTier`] under [`ResolutionPolicy::Disjoint`]
    ///   if two tiers overlap or a tier has an empty range.
    pub fn new(tiers: Vec<IncentiveTier>, policy: ResolutionPolicy) -> EngineResult<Self> {
        if tiers.is_empty() {
            return Err(EngineError::MissingTierCoverage {
                message: "no tiers defined and no floor amount to fall back on".to_string(),
            });
        }

        for tier in &tiers {
            validate_tier(tier)?;
        }

        let mut tiers = tiers;
        tiers.sort_by(|a, b| b.min_months.cmp(&a.min_months));

        for pair in tiers.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            if upper.min_months == lower.min_months {
                return Err(EngineError::InvalidTier {
                    tier_id: upper.id.clone(),
                    message: format!(
                        "shares min_months {} with tier '{}'",
                        upper.min_months, lower.id
                    ),
                });
            }
            if policy == ResolutionPolicy::Disjoint && lower.max_months > upper.min_months {
                return Err(EngineError::InvalidTier {
                    tier_id: lower.id.clone(),
                    message: format!(
                        "range [{}, {}) overlaps tier '{}' starting at {}",
                        lower.min_months, lower.max_months, upper.id, upper.min_months
                    ),
                });
            }
        }

        if policy == ResolutionPolicy::Disjoint {
            if let Some(empty) = tiers.iter().find(|t| t.min_months == t.max_months) {
                return Err(EngineError::InvalidTier {
                    tier_id: empty.id.clone(),
                    message: "min_months equals max_months, range is empty".to_string(),
                });
            }
        }

        Ok(Self { tiers, policy })
    }

    /// Returns the incentive amount for a service duration.
    pub fn resolve(&self, months_worked: Decimal) -> Decimal {
        self.resolve_tier(months_worked).incentive_amount
    }

    /// Returns the tier that applies to a service duration.
    ///
    /// Under [`ResolutionPolicy::Cascading`] the first tier, in descending
    /// `min_months` order, with `months_worked >= min_months` wins. Under
    /// [`ResolutionPolicy::Disjoint`] the tier whose `[min, max)` range
    /// contains `months_worked` wins. Either way, no match means the floor.
    pub fn resolve_tier(&self, months_worked: Decimal) -> &IncentiveTier {
        let matched = match self.policy {
            ResolutionPolicy::Cascading => {
                self.tiers.iter().find(|t| months_worked >= t.min_months)
            }
            ResolutionPolicy::Disjoint => self.tiers.iter().find(|t| t.contains(months_worked)),
        };
        matched.unwrap_or_else(|| self.floor())
    }

    /// The tier with the lowest `min_months`.
    pub fn floor(&self) -> &IncentiveTier {
        // Non-empty by construction, sorted descending.
        &self.tiers[self.tiers.len() - 1]
    }

    /// The resolution policy in force.
    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Tiers in evaluation order (descending `min_months`).
    pub fn tiers(&self) -> &[IncentiveTier] {
        &self.tiers
    }
}

fn validate_tier(tier: &IncentiveTier) -> EngineResult<()> {
    let invalid = |message: &str| EngineError::InvalidTier {
        tier_id: tier.id.clone(),
        message: message.to_string(),
    };

    if tier.min_months.is_sign_negative() && !tier.min_months.is_zero() {
        return Err(invalid("min_months must not be negative"));
    }
    if tier.min_months > tier.max_months {
        return Err(invalid("min_months exceeds max_months"));
    }
    if tier.incentive_amount.is_sign_negative() && !tier.incentive_amount.is_zero() {
        return Err(invalid("incentive_amount must not be negative"));
    }
    Ok(())
}
