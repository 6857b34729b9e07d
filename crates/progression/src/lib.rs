//! Engine families: tier-indexed queries and the unlock progression.
//!
//! Host state (technology research, funds) is reached only through the
//! capability traits in [`host`], so the progression logic runs the same
//! against a live game or an in-memory test double.

pub mod design;
pub mod family;
pub mod host;
pub mod load;

pub use design::Design;
pub use family::{Family, TierIndex};
pub use host::{
    FundsLedger, GameMode, TechRegistry, TechState, Transaction, TransactionReason, Treasury,
};
pub use load::FamilyError;
pub use tiers_propulsion::TechLevel;
