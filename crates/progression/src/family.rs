//! Tier-indexed facade over a family's tech levels and its unlock state machine.
//!
//! Queries on an invalid tier never fail: float accessors return NaN, the
//! ignition accessor returns zero and curve/string accessors return `None`.
//! Display code relies on NaN propagating through its own arithmetic to show
//! a missing tier.

use std::collections::BTreeMap;

use thiserror::Error;
use tiers_core::FloatCurve;
use tiers_core::constants::{SEA_LEVEL, VACUUM};
use tiers_propulsion::TechLevel;

use crate::design::Design;
use crate::host::{FundsLedger, TechRegistry, TransactionReason};
use crate::load::{FamilyError, validate};

/// Tier index as supplied by callers; negative values are simply out of range.
pub type TierIndex = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tier {0} is out of range")]
struct OutOfRange(TierIndex);

/// A group of tech levels sharing propellants and throttle range.
#[derive(Debug, Clone)]
pub struct Family {
    letter: char,
    description: String,
    propellants: BTreeMap<String, f64>,
    min_tf: f64,
    tech_levels: Vec<TechLevel>,
    unlocked: usize,
    baseline: Design,
}

impl Family {
    /// Assemble a family with nothing unlocked.
    ///
    /// Rejects an empty tier list, a throttle fraction outside (0, 1], negative
    /// propellant ratios, and any tech level without a positive reference thrust
    /// or with negative mass, cost, or burn time.
    pub fn new(
        letter: char,
        description: impl Into<String>,
        propellants: BTreeMap<String, f64>,
        min_tf: f64,
        tech_levels: Vec<TechLevel>,
    ) -> Result<Self, FamilyError> {
        let first = tech_levels.first().ok_or(FamilyError::NoTechLevels { letter })?;
        validate(letter, min_tf, &propellants, &tech_levels)?;
        let baseline = Design::from_level(first, min_tf, 0, first.max_thrust, first.max_ignitions);
        Ok(Self {
            letter,
            description: description.into(),
            propellants,
            min_tf,
            tech_levels,
            unlocked: 0,
            baseline,
        })
    }

    /// Restore a persisted unlock count, clamped to the number of tiers.
    pub fn with_unlocked(mut self, unlocked: usize) -> Self {
        self.unlocked = unlocked.min(self.tech_levels.len());
        self
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Propellant name to mixture ratio, as configured.
    pub fn propellants(&self) -> &BTreeMap<String, f64> {
        &self.propellants
    }

    /// Mixture ratios normalised to sum to one.
    pub fn propellant_fractions(&self) -> Vec<(&str, f64)> {
        let total: f64 = self.propellants.values().sum();
        self.propellants
            .iter()
            .map(|(name, ratio)| {
                let fraction = if total > 0.0 { ratio / total } else { 0.0 };
                (name.as_str(), fraction)
            })
            .collect()
    }

    pub fn min_throttle(&self) -> f64 {
        self.min_tf
    }

    pub fn tech_levels(&self) -> &[TechLevel] {
        &self.tech_levels
    }

    pub fn tier_count(&self) -> usize {
        self.tech_levels.len()
    }

    /// Number of tiers unlocked so far; tiers `0..unlocked_count()` are available.
    pub fn unlocked_count(&self) -> usize {
        self.unlocked
    }

    pub fn is_unlocked(&self, tier: TierIndex) -> bool {
        self.index(tier).is_some_and(|i| i < self.unlocked)
    }

    /// Tier 0 at reference thrust and rated ignitions.
    pub fn baseline(&self) -> &Design {
        &self.baseline
    }

    pub fn check(&self, tier: TierIndex) -> bool {
        self.index(tier).is_some()
    }

    fn index(&self, tier: TierIndex) -> Option<usize> {
        usize::try_from(tier)
            .ok()
            .filter(|&i| i < self.tech_levels.len())
    }

    fn level(&self, tier: TierIndex) -> Result<&TechLevel, OutOfRange> {
        self.index(tier)
            .map(|i| &self.tech_levels[i])
            .ok_or(OutOfRange(tier))
    }

    fn query(&self, tier: TierIndex, f: impl FnOnce(&TechLevel) -> f64) -> f64 {
        self.level(tier).map(f).unwrap_or(f64::NAN)
    }

    pub fn max_thrust(&self, tier: TierIndex) -> f64 {
        self.query(tier, |tl| tl.max_thrust)
    }

    pub fn min_thrust(&self, tier: TierIndex) -> f64 {
        self.max_thrust(tier) * self.min_tf
    }

    pub fn max_ignitions(&self, tier: TierIndex) -> u32 {
        self.level(tier).map(|tl| tl.max_ignitions).unwrap_or(0)
    }

    pub fn mass(&self, tier: TierIndex, thrust: f64) -> f64 {
        self.query(tier, |tl| tl.mass(thrust))
    }

    pub fn max_mass(&self, tier: TierIndex) -> f64 {
        self.query(tier, |tl| tl.mass)
    }

    pub fn cost(&self, tier: TierIndex, thrust: f64, ignitions: u32) -> f64 {
        self.query(tier, |tl| tl.cost(thrust, ignitions))
    }

    pub fn max_cost(&self, tier: TierIndex) -> f64 {
        self.query(tier, |tl| tl.cost)
    }

    pub fn tool_cost(&self, tier: TierIndex, thrust: f64, ignitions: u32) -> f64 {
        self.query(tier, |tl| tl.tool_cost(thrust, ignitions))
    }

    pub fn isp_curve(&self, tier: TierIndex) -> Option<&FloatCurve> {
        self.level(tier).ok().map(|tl| &tl.isp)
    }

    pub fn isp_atmo(&self, tier: TierIndex) -> f64 {
        self.isp_curve(tier)
            .map_or(f64::NAN, |curve| curve.evaluate(SEA_LEVEL))
    }

    pub fn isp_vac(&self, tier: TierIndex) -> f64 {
        self.isp_curve(tier)
            .map_or(f64::NAN, |curve| curve.evaluate(VACUUM))
    }

    pub fn burn_time(&self, tier: TierIndex) -> f64 {
        self.query(tier, |tl| tl.burn_time)
    }

    pub fn entry_cost(&self, tier: TierIndex) -> f64 {
        self.query(tier, |tl| tl.entry_cost)
    }

    pub fn tech_required(&self, tier: TierIndex) -> Option<&str> {
        self.level(tier).ok()?.tech_required.as_deref()
    }

    pub fn scale_factor(&self, tier: TierIndex, thrust: f64) -> f64 {
        self.query(tier, |tl| tl.scale_factor(thrust))
    }

    /// Whether the host allows this tier's technology. An invalid tier has no
    /// requirement and therefore reports `true`.
    pub fn have_tech_required<R>(&self, tier: TierIndex, registry: &R) -> bool
    where
        R: TechRegistry + ?Sized,
    {
        match self.tech_required(tier) {
            Some(tech) => tech_allowed(tech, registry),
            None => true,
        }
    }

    /// Derived summary for one configuration of a tier.
    pub fn design(&self, tier: TierIndex, thrust: f64, ignitions: u32) -> Option<Design> {
        let index = self.index(tier)?;
        Some(Design::from_level(
            &self.tech_levels[index],
            self.min_tf,
            index,
            thrust,
            ignitions,
        ))
    }

    /// Total entry cost of every still-locked tier up to and including `tier`.
    ///
    /// NaN for an invalid tier, zero when `tier` is already unlocked. Walks the
    /// same range [`Family::unlock`] would, without touching any state.
    pub fn unlock_cost(&self, tier: TierIndex) -> f64 {
        let Some(target) = self.index(tier) else {
            return f64::NAN;
        };
        self.tech_levels
            .get(self.unlocked..=target)
            .map(|locked| locked.iter().fold(0.0, |acc, tl| acc + tl.entry_cost))
            .unwrap_or(0.0)
    }

    /// Unlock every tier up to and including `tier`, one at a time.
    ///
    /// Stops silently at the first tier whose technology is missing or, when the
    /// host tracks funds, which the ledger cannot pay for. Tiers unlocked before
    /// the stop stay unlocked and stay paid for.
    pub fn unlock<R, L>(&mut self, tier: TierIndex, registry: &R, ledger: &mut L)
    where
        R: TechRegistry + ?Sized,
        L: FundsLedger + ?Sized,
    {
        let Some(target) = self.index(tier) else {
            return;
        };
        let tracks_funds = registry.game_mode().tracks_funds();

        while self.unlocked <= target {
            let next = &self.tech_levels[self.unlocked];
            if let Some(tech) = next.tech_required.as_deref() {
                if !tech_allowed(tech, registry) {
                    tracing::info!(
                        family = %self.letter,
                        tier = self.unlocked,
                        tech,
                        "unlock stopped: technology not researched"
                    );
                    return;
                }
            }
            if tracks_funds {
                let funds = ledger.funds();
                if funds < next.entry_cost {
                    tracing::info!(
                        family = %self.letter,
                        tier = self.unlocked,
                        funds,
                        entry_cost = next.entry_cost,
                        "unlock stopped: insufficient funds"
                    );
                    return;
                }
                ledger.deduct(next.entry_cost, TransactionReason::RnDPartPurchase);
            }
            self.unlocked += 1;
            tracing::debug!(family = %self.letter, unlocked = self.unlocked, "tier unlocked");
        }
    }
}

fn tech_allowed<R>(tech: &str, registry: &R) -> bool
where
    R: TechRegistry + ?Sized,
{
    tech.is_empty() || !registry.game_mode().gates_tech() || registry.is_available(tech)
}
