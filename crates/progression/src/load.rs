//! Conversion from configuration records into runtime families.
//!
//! Any malformed field rejects the whole family; nothing required is defaulted.

use std::collections::BTreeMap;

use thiserror::Error;
use tiers_config::{CurveKeyConfig, FamilyConfig, TechLevelConfig};
use tiers_core::constants::DEFAULT_MIN_THROTTLE;
use tiers_core::{CurveKey, FloatCurve};
use tiers_propulsion::TechLevel;

use crate::family::Family;

/// Errors surfaced while validating a family definition.
#[derive(Debug, Error)]
pub enum FamilyError {
    #[error("family letter must be a single character, got '{0}'")]
    InvalidLetter(String),
    #[error("family '{letter}' defines no tech levels")]
    NoTechLevels { letter: char },
    #[error("family '{letter}' minTf must lie in (0, 1], got {value}")]
    InvalidMinThrottle { letter: char, value: f64 },
    #[error("family '{letter}' propellant '{name}' has invalid ratio {value}")]
    InvalidPropellant {
        letter: char,
        name: String,
        value: f64,
    },
    #[error("family '{letter}' tech level {level}: maxThrust must be positive, got {value}")]
    NonPositiveThrust { letter: char, level: usize, value: f64 },
    #[error("family '{letter}' tech level {level}: {field} must be a non-negative number, got {value}")]
    InvalidValue {
        letter: char,
        level: usize,
        field: &'static str,
        value: f64,
    },
    #[error("family '{letter}' tech level {level}: isp curve has no keys")]
    EmptyIspCurve { letter: char, level: usize },
    #[error("family '{letter}' tech level {level}: isp key needs 2 or 4 numbers, got {arity}")]
    InvalidCurveKey {
        letter: char,
        level: usize,
        arity: usize,
    },
}

impl Family {
    /// Build a family from configuration and restore its persisted unlock count.
    pub fn from_config(config: FamilyConfig, unlocked: usize) -> Result<Self, FamilyError> {
        Ok(Family::try_from(config)?.with_unlocked(unlocked))
    }
}

impl TryFrom<FamilyConfig> for Family {
    type Error = FamilyError;

    fn try_from(value: FamilyConfig) -> Result<Self, Self::Error> {
        let letter = parse_letter(&value.letter)?;

        let min_tf = value.min_tf.unwrap_or(DEFAULT_MIN_THROTTLE);

        let tech_levels = value
            .tech_levels
            .into_iter()
            .enumerate()
            .map(|(level, cfg)| tech_level(letter, level, cfg))
            .collect::<Result<Vec<_>, _>>()?;

        let family = Family::new(
            letter,
            value.description,
            value.propellants,
            min_tf,
            tech_levels,
        )?;
        tracing::debug!(
            family = %letter,
            tiers = family.tier_count(),
            "loaded engine family"
        );
        Ok(family)
    }
}

/// Checks shared by every way of building a family: throttle range,
/// propellant ratios, and each tech level's reference values.
pub(crate) fn validate(
    letter: char,
    min_tf: f64,
    propellants: &BTreeMap<String, f64>,
    tech_levels: &[TechLevel],
) -> Result<(), FamilyError> {
    if !(min_tf > 0.0 && min_tf <= 1.0) {
        return Err(FamilyError::InvalidMinThrottle {
            letter,
            value: min_tf,
        });
    }

    if let Some((name, &ratio)) = propellants
        .iter()
        .find(|(_, ratio)| !ratio.is_finite() || **ratio < 0.0)
    {
        return Err(FamilyError::InvalidPropellant {
            letter,
            name: name.clone(),
            value: ratio,
        });
    }

    for (level, tl) in tech_levels.iter().enumerate() {
        if !(tl.max_thrust.is_finite() && tl.max_thrust > 0.0) {
            return Err(FamilyError::NonPositiveThrust {
                letter,
                level,
                value: tl.max_thrust,
            });
        }

        for (field, value) in [
            ("entryCost", tl.entry_cost),
            ("mass", tl.mass),
            ("cost", tl.cost),
            ("toolCost", tl.tool_cost),
            ("burnTime", tl.burn_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FamilyError::InvalidValue {
                    letter,
                    level,
                    field,
                    value,
                });
            }
        }

        if tl.isp.is_empty() {
            return Err(FamilyError::EmptyIspCurve { letter, level });
        }
    }
    Ok(())
}

fn parse_letter(raw: &str) -> Result<char, FamilyError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Ok(letter),
        _ => Err(FamilyError::InvalidLetter(raw.to_string())),
    }
}

fn tech_level(letter: char, level: usize, cfg: TechLevelConfig) -> Result<TechLevel, FamilyError> {
    let keys = cfg
        .isp
        .iter()
        .map(|key| curve_key(letter, level, key))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TechLevel {
        tech_required: cfg.tech_required.filter(|tech| !tech.is_empty()),
        entry_cost: cfg.entry_cost,
        max_thrust: cfg.max_thrust,
        isp: FloatCurve::new(keys),
        max_ignitions: cfg.max_ignitions,
        mass: cfg.mass,
        cost: cfg.cost,
        tool_cost: cfg.tool_cost,
        burn_time: cfg.burn_time,
    })
}

fn curve_key(letter: char, level: usize, key: &CurveKeyConfig) -> Result<CurveKey, FamilyError> {
    match key.0.as_slice() {
        &[time, value] => Ok(CurveKey::new(time, value)),
        &[time, value, in_tangent, out_tangent] => Ok(CurveKey::with_tangents(
            time,
            value,
            in_tangent,
            out_tangent,
        )),
        other => Err(FamilyError::InvalidCurveKey {
            letter,
            level,
            arity: other.len(),
        }),
    }
}
