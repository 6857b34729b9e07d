//! Tech-gated parametric scaling of engine families.
//!
//! Families are loaded once from configuration, queried per tier as a design
//! parameter (thrust) changes, and advanced through their tiers by the unlock
//! progression. The member crates are re-exported here so front-ends depend on
//! a single library.

pub mod catalog;

pub use tiers_config as config;
pub use tiers_core as primitives;
pub use tiers_export as export;
pub use tiers_progression as progression;
pub use tiers_propulsion as propulsion;

pub use catalog::{Catalog, CatalogError, ProgressSnapshot};
pub use tiers_progression::{
    Design, Family, FamilyError, FundsLedger, GameMode, TechLevel, TechRegistry, TechState,
    TierIndex, TransactionReason, Treasury,
};

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
