//! Core units, constants, and shared primitives for the engine tier workspace.

pub mod curve;

pub use curve::{CurveKey, FloatCurve};

/// Scaling constants shared by every tech level.
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Exponent applied to the thrust ratio when scaling mass.
    pub const MASS_EXPONENT: f64 = 0.8;
    /// Exponent applied to the thrust ratio when scaling cost.
    pub const COST_THRUST_EXPONENT: f64 = 1.2;
    /// Exponent applied to the rated-ignition ratio when scaling cost.
    pub const COST_IGNITION_EXPONENT: f64 = 0.2;
    /// Minimum throttle fraction used when a family does not specify one.
    pub const DEFAULT_MIN_THROTTLE: f64 = 0.2;
    /// Pressure fraction of a vacuum.
    pub const VACUUM: f64 = 0.0;
    /// Pressure fraction of sea-level atmosphere.
    pub const SEA_LEVEL: f64 = 1.0;
}

/// Basic unit conversion helpers.
///
/// Thrust is expressed in kilonewtons and mass in tonnes, so a kilonewton
/// divided by an exhaust velocity in m/s yields tonnes per second.
pub mod units {
    use super::constants::G0;

    /// Effective exhaust velocity (m/s) for a specific impulse in seconds.
    #[inline]
    pub fn exhaust_velocity_m_s(isp_seconds: f64) -> f64 {
        isp_seconds * G0
    }

    /// Propellant mass flow (t/s) needed to sustain `thrust_kn` at `isp_seconds`.
    #[inline]
    pub fn mass_flow_t_s(thrust_kn: f64, isp_seconds: f64) -> f64 {
        thrust_kn / exhaust_velocity_m_s(isp_seconds)
    }
}

/// Ratio helpers used by the scaling laws.
pub mod ratio {
    /// `value / reference` raised to `exponent`.
    #[inline]
    pub fn scaled(value: f64, reference: f64, exponent: f64) -> f64 {
        (value / reference).powf(exponent)
    }
}
