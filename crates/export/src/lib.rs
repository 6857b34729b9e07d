//! Export helpers for CSV and JSON thrust sweeps.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tiers_progression::{Family, TierIndex};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("tier {tier} does not exist in family '{letter}'")]
    UnknownTier { letter: char, tier: TierIndex },
    #[error("a sweep needs at least two steps, got {0}")]
    TooFewSteps(usize),
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One sampled thrust setting.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SweepRow {
    pub thrust: f64,
    pub mass: f64,
    pub cost: f64,
    pub tool_cost: f64,
    pub scale_factor: f64,
}

/// Samples for one tier, from minimum to maximum thrust inclusive.
#[derive(Debug, Clone, Serialize)]
pub struct Sweep {
    pub family: char,
    pub tier: TierIndex,
    pub ignitions: u32,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<SweepRow>,
}

/// Sample `steps` evenly spaced thrust values across the tier's throttle range.
pub fn sweep(
    family: &Family,
    tier: TierIndex,
    ignitions: u32,
    steps: usize,
) -> Result<Sweep, ExportError> {
    if !family.check(tier) {
        return Err(ExportError::UnknownTier {
            letter: family.letter(),
            tier,
        });
    }
    if steps < 2 {
        return Err(ExportError::TooFewSteps(steps));
    }

    let lo = family.min_thrust(tier);
    let hi = family.max_thrust(tier);
    let step = (hi - lo) / (steps - 1) as f64;
    let rows = (0..steps)
        .map(|i| {
            let thrust = if i + 1 == steps { hi } else { lo + step * i as f64 };
            SweepRow {
                thrust,
                mass: family.mass(tier, thrust),
                cost: family.cost(tier, thrust, ignitions),
                tool_cost: family.tool_cost(tier, thrust, ignitions),
                scale_factor: family.scale_factor(tier, thrust),
            }
        })
        .collect();

    Ok(Sweep {
        family: family.letter(),
        tier,
        ignitions,
        generated_at: Utc::now(),
        rows,
    })
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Write the sweep rows as CSV with a header line.
pub fn write_csv<W: Write>(writer: W, sweep: &Sweep) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in &sweep.rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the whole sweep, metadata included, as pretty JSON.
pub fn write_json<W: Write>(mut writer: W, sweep: &Sweep) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, sweep)?;
    writeln!(writer)?;
    Ok(())
}
