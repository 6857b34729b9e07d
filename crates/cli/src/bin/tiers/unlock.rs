use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use clap::{Args, ValueEnum};
use engine_tiers::{Catalog, GameMode, ProgressSnapshot, TechState, TierIndex, Treasury};

#[derive(Args, Debug)]
pub struct UnlockArgs {
    #[arg(long)]
    family: char,

    #[arg(long)]
    tier: TierIndex,

    #[arg(long, value_enum, default_value_t = Mode::Career)]
    mode: Mode,

    /// Available funds (career mode)
    #[arg(long, default_value_t = 0.0)]
    funds: f64,

    /// Researched technology id; repeat for several
    #[arg(long = "tech")]
    techs: Vec<String>,

    /// Progress JSON to restore from and save back to
    #[arg(long)]
    progress: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Mode {
    Sandbox,
    Science,
    Career,
}

impl From<Mode> for GameMode {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Sandbox => GameMode::Sandbox,
            Mode::Science => GameMode::Science,
            Mode::Career => GameMode::Career,
        }
    }
}

pub fn run(config: &Path, args: UnlockArgs) -> anyhow::Result<()> {
    let progress = match &args.progress {
        Some(path) => ProgressSnapshot::read(path)?,
        None => ProgressSnapshot::default(),
    };
    let mut catalog = Catalog::load_with_progress(config, &progress)?;
    let family = catalog
        .family_mut(args.family)
        .ok_or_else(|| anyhow!("Family '{}' not found in catalog", args.family))?;
    if !family.check(args.tier) {
        bail!("Family '{}' has no tier {}", args.family, args.tier);
    }

    let registry = TechState::with_researched(args.mode.into(), args.techs);
    let mut treasury = Treasury::new(args.funds);
    let before = family.unlocked_count();

    println!(
        "Unlock cost  : {:.0} ({} of {} tiers unlocked)",
        family.unlock_cost(args.tier),
        before,
        family.tier_count()
    );
    family.unlock(args.tier, &registry, &mut treasury);
    let after = family.unlocked_count();
    println!("Unlocked     : {} -> {}", before, after);
    println!("Spent        : {:.0}", treasury.total_spent());
    if !family.is_unlocked(args.tier) {
        if let Some(tech) = family.tech_required(after as TierIndex) {
            if !family.have_tech_required(after as TierIndex, &registry) {
                println!("Blocked      : tier {after} requires '{tech}'");
            }
        }
    }

    if let Some(path) = &args.progress {
        catalog.snapshot().write(path)?;
        tracing::debug!(path = %path.display(), "progress saved");
    }
    Ok(())
}
