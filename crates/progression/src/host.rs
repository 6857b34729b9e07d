//! Capabilities the embedding game provides, plus in-memory implementations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How the host gates progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Everything is available and free.
    Sandbox,
    /// Technology gates tiers; funds are not tracked.
    Science,
    /// Technology and funds both gate tiers.
    Career,
}

impl GameMode {
    pub fn gates_tech(self) -> bool {
        !matches!(self, GameMode::Sandbox)
    }

    pub fn tracks_funds(self) -> bool {
        matches!(self, GameMode::Career)
    }
}

/// Read access to the host's research state.
pub trait TechRegistry {
    fn game_mode(&self) -> GameMode;
    /// Whether the technology `tech` has been researched.
    fn is_available(&self, tech: &str) -> bool;
}

/// Category attached to every funds movement for audit and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionReason {
    RnDPartPurchase,
}

/// The host's funds account.
pub trait FundsLedger {
    fn funds(&self) -> f64;
    fn deduct(&mut self, amount: f64, reason: TransactionReason);
}

/// Research state held in memory.
#[derive(Debug, Clone)]
pub struct TechState {
    mode: GameMode,
    researched: BTreeSet<String>,
}

impl TechState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            researched: BTreeSet::new(),
        }
    }

    pub fn with_researched<I, S>(mode: GameMode, techs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode,
            researched: techs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn research(&mut self, tech: impl Into<String>) {
        self.researched.insert(tech.into());
    }
}

impl TechRegistry for TechState {
    fn game_mode(&self) -> GameMode {
        self.mode
    }

    fn is_available(&self, tech: &str) -> bool {
        self.researched.contains(tech)
    }
}

/// A recorded funds movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: f64,
    pub reason: TransactionReason,
}

/// Funds account held in memory with a full transaction log.
#[derive(Debug, Clone, Default)]
pub struct Treasury {
    balance: f64,
    log: Vec<Transaction>,
}

impl Treasury {
    pub fn new(balance: f64) -> Self {
        Self {
            balance,
            log: Vec::new(),
        }
    }

    /// An account that can afford anything.
    pub fn unlimited() -> Self {
        Self::new(f64::INFINITY)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.log
    }

    pub fn total_spent(&self) -> f64 {
        self.log.iter().fold(0.0, |acc, t| acc + t.amount)
    }
}

impl FundsLedger for Treasury {
    fn funds(&self) -> f64 {
        self.balance
    }

    fn deduct(&mut self, amount: f64, reason: TransactionReason) {
        debug_assert!(amount >= 0.0, "deduction must not credit funds: {amount}");
        self.balance -= amount;
        self.log.push(Transaction { amount, reason });
    }
}
