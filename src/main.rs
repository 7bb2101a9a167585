//! Frontline - headless runner
//!
//! Plays one game from the command line and prints a summary. With
//! `--realtime` ticks are paced by the configured tick interval.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use frontline::core::error::Result;
use frontline::core::types::FactionId;
use frontline::simulation::{Simulation, TickReport};
use frontline::{Phase, SimulationConfig};

/// Frontline - grid territorial conquest simulation
#[derive(Parser, Debug)]
#[command(name = "frontline")]
#[command(about = "Run a territorial conquest game and report the outcome")]
struct Args {
    /// Number of factions (2, 3 or 4)
    #[arg(long)]
    factions: Option<usize>,

    /// Width and height of the grid in cells
    #[arg(long)]
    grid_size: Option<usize>,

    /// Speed multiplier over the base 100ms tick
    #[arg(long)]
    speed: Option<f64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks if nobody has won
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// TOML config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force an alliance between two factions, e.g. `--ally 0,2`
    #[arg(long, value_parser = parse_pair)]
    ally: Option<(u8, u8)>,

    /// Write the final snapshot as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Pace ticks in real time instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn parse_pair(s: &str) -> std::result::Result<(u8, u8), String> {
    let (a, b) = s.split_once(',').ok_or_else(|| format!("expected A,B but got '{}'", s))?;
    let a = a.trim().parse::<u8>().map_err(|e| e.to_string())?;
    let b = b.trim().parse::<u8>().map_err(|e| e.to_string())?;
    Ok((a, b))
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(factions) = args.factions {
        config.faction_count = factions;
    }
    if let Some(size) = args.grid_size {
        config.grid_size = size;
    }
    if let Some(speed) = args.speed {
        config.speed_multiplier = speed;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some((a, b)) = args.ally {
        config.forced_alliance = Some((FactionId(a), FactionId(b)));
    }

    config.validate()?;
    Ok(config)
}

fn log_report(report: &TickReport) {
    for event in &report.events {
        tracing::debug!("[tick {}] {}", event.tick, event.event_type.describe());
    }
}

/// Tick on a fixed interval until the game ends or the budget runs out
async fn run_realtime(sim: &mut Simulation, max_ticks: u64) -> Result<()> {
    let mut interval = tokio::time::interval(sim.tick_interval().max(Duration::from_millis(1)));
    sim.start();

    for _ in 0..max_ticks {
        interval.tick().await;
        let report = sim.tick()?;
        log_report(&report);
        if report.phase == Phase::Ended {
            break;
        }
    }
    Ok(())
}

fn run_headless(sim: &mut Simulation, max_ticks: u64) -> Result<()> {
    sim.start();
    for _ in 0..max_ticks {
        let report = sim.tick()?;
        log_report(&report);
        if report.phase == Phase::Ended {
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let mut sim = Simulation::new(config)?;

    if args.realtime {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        runtime.block_on(run_realtime(&mut sim, args.ticks))?;
    } else {
        run_headless(&mut sim, args.ticks)?;
    }

    let snapshot = sim.snapshot();
    if let Some(path) = &args.snapshot {
        snapshot.write_json(path)?;
        tracing::info!("Snapshot written to {}", path.display());
    }

    println!("{}", snapshot.summary());
    match sim.winner() {
        Some(winner) => println!("{} is victorious", winner),
        None => println!("No winner after {} ticks", sim.state().tick),
    }
    for event in sim.history().recent(5) {
        println!("  [tick {}] {}", event.tick, event.event_type.describe());
    }

    Ok(())
}
