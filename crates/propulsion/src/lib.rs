//! Tech level descriptors and their thrust scaling laws.
//!
//! Every quantity scales against the level's reference (maximum) thrust. The
//! formulas are total over positive thrust; values outside that domain simply
//! propagate NaN, so callers validate design parameters before asking.

use tiers_core::FloatCurve;
use tiers_core::constants::{COST_IGNITION_EXPONENT, COST_THRUST_EXPONENT, MASS_EXPONENT};
use tiers_core::ratio::scaled;

/// Baseline capability of one technology tier.
#[derive(Debug, Clone)]
pub struct TechLevel {
    /// Technology that must be researched first; `None` means always available.
    pub tech_required: Option<String>,
    /// One-time price to unlock the level.
    pub entry_cost: f64,
    /// Reference thrust (kN) at which mass, cost and ignitions are defined. Always positive.
    pub max_thrust: f64,
    /// Specific impulse against pressure fraction (0 = vacuum, 1 = sea level).
    pub isp: FloatCurve,
    pub max_ignitions: u32,
    pub mass: f64,
    pub cost: f64,
    pub tool_cost: f64,
    pub burn_time: f64,
}

impl TechLevel {
    /// Engine mass at `thrust`; grows sub-linearly with thrust.
    pub fn mass(&self, thrust: f64) -> f64 {
        scaled(thrust, self.max_thrust, MASS_EXPONENT) * self.mass
    }

    /// Shared multiplier for cost and tool cost.
    pub fn cost_factor(&self, thrust: f64, ignitions: u32) -> f64 {
        let rated = (f64::from(ignitions) + 1.0) / (f64::from(self.max_ignitions) + 1.0);
        scaled(thrust, self.max_thrust, COST_THRUST_EXPONENT) * rated.powf(COST_IGNITION_EXPONENT)
    }

    pub fn cost(&self, thrust: f64, ignitions: u32) -> f64 {
        self.cost_factor(thrust, ignitions) * self.cost
    }

    pub fn tool_cost(&self, thrust: f64, ignitions: u32) -> f64 {
        self.cost_factor(thrust, ignitions) * self.tool_cost
    }

    /// Linear dimension multiplier for geometry callers.
    pub fn scale_factor(&self, thrust: f64) -> f64 {
        (thrust / self.max_thrust).sqrt()
    }
}
