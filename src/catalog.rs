//! Loaded set of engine families and persistence of their unlock progress.
//!
//! The host owns saving; a [`ProgressSnapshot`] is the JSON record it stores and
//! hands back when the next session loads the catalog.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiers_config::{ConfigError, FamilyConfig, load_families};
use tiers_progression::{Family, FamilyError};

/// Errors surfaced while loading a catalog or its saved progress.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid family definition: {0}")]
    Family(#[from] FamilyError),
    #[error("family letter '{0}' is defined more than once")]
    DuplicateLetter(char),
    #[error("failed to access progress file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse progress JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unlocked tier count per family letter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub unlocked: BTreeMap<char, usize>,
}

impl ProgressSnapshot {
    pub fn unlocked_for(&self, letter: char) -> usize {
        self.unlocked.get(&letter).copied().unwrap_or(0)
    }

    /// Read a snapshot, treating a missing file as a fresh game.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), CatalogError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Every family known to the session, in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    families: Vec<Family>,
}

impl Catalog {
    /// Load families with nothing unlocked.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Self::load_with_progress(path, &ProgressSnapshot::default())
    }

    /// Load families and restore their saved unlock counts.
    pub fn load_with_progress<P: AsRef<Path>>(
        path: P,
        progress: &ProgressSnapshot,
    ) -> Result<Self, CatalogError> {
        Self::from_configs(load_families(path)?, progress)
    }

    pub fn from_configs(
        configs: Vec<FamilyConfig>,
        progress: &ProgressSnapshot,
    ) -> Result<Self, CatalogError> {
        let mut families: Vec<Family> = Vec::with_capacity(configs.len());
        for config in configs {
            let family = Family::try_from(config)?;
            let letter = family.letter();
            if families.iter().any(|f| f.letter() == letter) {
                return Err(CatalogError::DuplicateLetter(letter));
            }
            families.push(family.with_unlocked(progress.unlocked_for(letter)));
        }
        tracing::debug!(families = families.len(), "catalog loaded");
        Ok(Self { families })
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    pub fn family(&self, letter: char) -> Option<&Family> {
        self.families.iter().find(|f| f.letter() == letter)
    }

    pub fn family_mut(&mut self, letter: char) -> Option<&mut Family> {
        self.families.iter_mut().find(|f| f.letter() == letter)
    }

    /// Current unlock counts, ready for the host to persist.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            unlocked: self
                .families
                .iter()
                .map(|f| (f.letter(), f.unlocked_count()))
                .collect(),
        }
    }
}
