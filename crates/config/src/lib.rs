//! Configuration models and loaders for engine families.
//!
//! Field names follow the host's record keys (`maxThrust`, `TechLevel`, ...) so
//! existing definitions load without renaming.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One engine family as written in a configuration file.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FamilyConfig {
    pub letter: String,
    pub description: String,
    #[serde(rename = "Propellants")]
    pub propellants: BTreeMap<String, f64>,
    #[serde(default)]
    pub min_tf: Option<f64>,
    #[serde(rename = "TechLevel", default)]
    pub tech_levels: Vec<TechLevelConfig>,
}

/// One tier of a family. Every field without a default is required.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TechLevelConfig {
    #[serde(default)]
    pub tech_required: Option<String>,
    #[serde(default)]
    pub entry_cost: f64,
    pub max_thrust: f64,
    pub isp: Vec<CurveKeyConfig>,
    pub max_ignitions: u32,
    pub mass: f64,
    pub cost: f64,
    pub tool_cost: f64,
    pub burn_time: f64,
}

/// Curve control point: `[time, value]` or `[time, value, inTangent, outTangent]`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct CurveKeyConfig(pub Vec<f64>);

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load family configurations from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_families<P: AsRef<Path>>(path: P) -> Result<Vec<FamilyConfig>, ConfigError> {
    load_records(path)
}

/// Parse a single family from TOML text.
pub fn family_from_toml(contents: &str) -> Result<FamilyConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

/// Parse a list of families from YAML text.
pub fn families_from_yaml(contents: &str) -> Result<Vec<FamilyConfig>, ConfigError> {
    Ok(serde_yaml::from_str(contents)?)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
