//! `ai-sim` - run a tactical scenario headlessly.
//!
//! - `ai-sim` runs the built-in skirmish
//! - `ai-sim --scenario path.yaml` runs a scenario file
//! - `ai-sim --dump-config` prints the effective scenario as YAML

use std::path::PathBuf;

use ai_sim::{ArenaConfig, Simulation};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "ai-sim")]
#[command(about = "Run tactical AI brains in a headless arena", version)]
struct Cli {
    /// Scenario file (YAML). Defaults to the built-in skirmish.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Override the scenario's tick budget
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the scenario's seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the brain trace after the run
    #[arg(long)]
    trace: bool,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the effective scenario and exit
    #[arg(long)]
    dump_config: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    fmt().with_env_filter(filter).with_target(false).init();

    let mut config = match &cli.scenario {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::skirmish(),
    };
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    if cli.dump_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let mut sim = Simulation::new(config)?;
    let summary = sim.run();

    if cli.trace {
        for event in &sim.trace().events {
            println!(
                "{:>6} agent={:<4} {} {}",
                event.tick, event.agent, event.tag, event.detail
            );
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("ticks:            {}", summary.ticks);
        println!("behavior changes: {}", summary.behavior_changes);
        println!("captures:         {}", summary.captures);
        for (team, alive) in &summary.survivors {
            println!("team {team}: {alive} alive");
        }
        for (id, owner) in &summary.objectives {
            match owner {
                Some(team) => println!("objective {id}: team {team}"),
                None => println!("objective {id}: neutral"),
            }
        }
    }

    Ok(())
}
