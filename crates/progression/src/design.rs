//! Derived summary of one engine configuration within a family.

use serde::Serialize;
use tiers_core::constants::{SEA_LEVEL, VACUUM};
use tiers_core::units::mass_flow_t_s;
use tiers_propulsion::TechLevel;

/// Everything display and part code needs for a (tier, thrust, ignitions) choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    pub tier: usize,
    pub thrust: f64,
    pub min_thrust: f64,
    pub ignitions: u32,
    pub mass: f64,
    pub cost: f64,
    pub tool_cost: f64,
    pub isp_vac: f64,
    pub isp_atmo: f64,
    pub burn_time: f64,
    pub scale_factor: f64,
    /// Propellant flow at full thrust in vacuum (t/s).
    pub mass_flow: f64,
    /// Propellant consumed over the rated burn time (t).
    pub propellant_mass: f64,
}

impl Design {
    pub(crate) fn from_level(
        level: &TechLevel,
        min_tf: f64,
        tier: usize,
        thrust: f64,
        ignitions: u32,
    ) -> Self {
        let isp_vac = level.isp.evaluate(VACUUM);
        let mass_flow = mass_flow_t_s(thrust, isp_vac);
        Self {
            tier,
            thrust,
            min_thrust: thrust * min_tf,
            ignitions,
            mass: level.mass(thrust),
            cost: level.cost(thrust, ignitions),
            tool_cost: level.tool_cost(thrust, ignitions),
            isp_vac,
            isp_atmo: level.isp.evaluate(SEA_LEVEL),
            burn_time: level.burn_time,
            scale_factor: level.scale_factor(thrust),
            mass_flow,
            propellant_mass: mass_flow * level.burn_time,
        }
    }
}
