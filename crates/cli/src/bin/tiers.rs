use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, Subcommand, ValueEnum};
use engine_tiers::export;
use engine_tiers::{Catalog, Family, TierIndex};
use tracing_subscriber::EnvFilter;

#[path = "tiers/unlock.rs"]
mod unlock;

/// Inspect engine families, their scaled attributes, and unlock progression.
#[derive(Parser, Debug)]
#[command(author, version, about = "Engine tier scaling and unlock explorer")]
struct Cli {
    /// Family definitions: a directory of TOML files, one TOML file, or a YAML list
    #[arg(long, global = true, default_value = "configs/families")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every family and its tiers
    List,
    /// Show the derived design for one tier and thrust
    Show {
        #[arg(long)]
        family: char,
        #[arg(long)]
        tier: TierIndex,
        /// Thrust in kN (defaults to the tier's reference thrust)
        #[arg(long)]
        thrust: Option<f64>,
        /// Rated ignitions (defaults to the tier's maximum)
        #[arg(long)]
        ignitions: Option<u32>,
    },
    /// Sample mass and cost across a tier's throttle range
    Sweep {
        #[arg(long)]
        family: char,
        #[arg(long)]
        tier: TierIndex,
        #[arg(long)]
        ignitions: Option<u32>,
        #[arg(long, default_value_t = 11)]
        steps: usize,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Output file (use '-' for stdout)
        #[arg(long, default_value = "-")]
        output: PathBuf,
    },
    /// Unlock tiers up to and including the given one
    Unlock(unlock::UnlockArgs),
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Format {
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tiers=info,tiers_progression=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::List => {
            let catalog = Catalog::load(&cli.config)?;
            list(&catalog);
        }
        Command::Show {
            family,
            tier,
            thrust,
            ignitions,
        } => {
            let catalog = Catalog::load(&cli.config)?;
            let family = find_family(&catalog, family)?;
            show(family, tier, thrust, ignitions)?;
        }
        Command::Sweep {
            family,
            tier,
            ignitions,
            steps,
            format,
            output,
        } => {
            let catalog = Catalog::load(&cli.config)?;
            let family = find_family(&catalog, family)?;
            let ignitions = ignitions.unwrap_or_else(|| family.max_ignitions(tier));
            let sweep = export::sweep(family, tier, ignitions, steps)?;
            let writer = export::writer_for_path(&output)?;
            match format {
                Format::Csv => export::write_csv(writer, &sweep)?,
                Format::Json => export::write_json(writer, &sweep)?,
            }
        }
        Command::Unlock(args) => unlock::run(&cli.config, args)?,
    }
    Ok(())
}

fn find_family(catalog: &Catalog, letter: char) -> anyhow::Result<&Family> {
    catalog
        .family(letter)
        .ok_or_else(|| anyhow!("Family '{}' not found in catalog", letter))
}

fn list(catalog: &Catalog) {
    for family in catalog.families() {
        let propellants: Vec<String> = family
            .propellant_fractions()
            .into_iter()
            .map(|(name, fraction)| format!("{name} {:.1}%", fraction * 100.0))
            .collect();
        println!(
            "[{}] {} (min throttle {:.0}%, {})",
            family.letter(),
            family.description(),
            family.min_throttle() * 100.0,
            propellants.join(", ")
        );
        for (index, level) in family.tech_levels().iter().enumerate() {
            let tier = index as TierIndex;
            println!(
                "  tier {:<2} {:>8.1} kN  isp {:>5.1}/{:>5.1} s  entry {:>8.0}  tech {}",
                tier,
                level.max_thrust,
                family.isp_vac(tier),
                family.isp_atmo(tier),
                level.entry_cost,
                level.tech_required.as_deref().unwrap_or("-")
            );
        }
    }
}

fn show(
    family: &Family,
    tier: TierIndex,
    thrust: Option<f64>,
    ignitions: Option<u32>,
) -> anyhow::Result<()> {
    let thrust = thrust.unwrap_or_else(|| family.max_thrust(tier));
    let ignitions = ignitions.unwrap_or_else(|| family.max_ignitions(tier));
    let design = family
        .design(tier, thrust, ignitions)
        .ok_or_else(|| anyhow!("Family '{}' has no tier {}", family.letter(), tier))?;

    println!("=== {} tier {} ===", family.letter(), design.tier);
    println!(
        "Thrust       : {:.2} kN (min {:.2} kN)",
        design.thrust, design.min_thrust
    );
    println!("Ignitions    : {}", design.ignitions);
    println!("Mass         : {:.3} t", design.mass);
    println!(
        "Cost         : {:.0} (tooling {:.0})",
        design.cost, design.tool_cost
    );
    println!(
        "Isp          : {:.1} s vac, {:.1} s atmo",
        design.isp_vac, design.isp_atmo
    );
    println!("Burn time    : {:.0} s", design.burn_time);
    println!("Scale factor : {:.3}", design.scale_factor);
    println!(
        "Propellant   : {:.4} t/s, {:.2} t over rated burn",
        design.mass_flow, design.propellant_mass
    );
    Ok(())
}
