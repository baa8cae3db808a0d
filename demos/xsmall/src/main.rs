//! xsmall: smallest runnable automail simulation.
//!
//! Three robots deliver a generated (or CSV-loaded) batch of mail in an
//! eleven-floor building and write `deliveries.csv` plus
//! `tick_summaries.csv` to the output directory.
//!
//! ```text
//! xsmall [--config run.json] [--arrivals mail.csv] [--robots N] [--seed S]
//!        [--furthest-first] [--output DIR] [--verbose]
//! ```
//!
//! `run.json` holds two optional objects, `sim` (a `SimConfig`) and `mail`
//! (a `MailGeneratorConfig`); missing fields take their defaults.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use am_core::SimConfig;
use am_mail::{MailGeneratorConfig, load_arrivals_csv};
use am_output::{CsvWriter, SimOutputObserver};
use am_pool::PoolOrder;
use am_sim::SimBuilder;

#[derive(Parser)]
#[command(name = "xsmall")]
#[command(about = "Run a small automail delivery simulation")]
struct Cli {
    /// JSON run configuration
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Arrivals CSV (mail_id,arrival_tick,destination_floor,weight); replaces generated mail
    #[arg(long, short)]
    arrivals: Option<PathBuf>,

    /// Override the number of robots
    #[arg(long, short)]
    robots: Option<usize>,

    /// Override the random seed
    #[arg(long, short)]
    seed: Option<u64>,

    /// Load the highest-floor mail first instead of oldest first
    #[arg(long)]
    furthest_first: bool,

    /// Output directory
    #[arg(long, short, default_value = "output/xsmall")]
    output: PathBuf,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunConfig {
    sim:  SimConfig,
    mail: MailGeneratorConfig,
}

impl RunConfig {
    fn load(cli: &Cli) -> Result<Self> {
        let mut run = match &cli.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => RunConfig::default(),
        };
        if let Some(robots) = cli.robots {
            run.sim.robots = robots;
        }
        if let Some(seed) = cli.seed {
            run.sim.seed = seed;
        }
        Ok(run)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let run = RunConfig::load(&cli)?;
    let order = if cli.furthest_first {
        PoolOrder::FurthestFirst
    } else {
        PoolOrder::Arrival
    };

    let builder = SimBuilder::new(run.sim.clone()).pool_order(order);
    let builder = match &cli.arrivals {
        Some(path) => {
            let queue = load_arrivals_csv(path)
                .with_context(|| format!("loading arrivals from {}", path.display()))?;
            info!(mail = queue.len(), path = %path.display(), "arrivals loaded");
            builder.arrivals(queue)
        }
        None => builder.generated(run.mail.clone())?,
    };
    let mut sim = builder.build()?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let writer = CsvWriter::new(&cli.output)?;
    let mut obs = SimOutputObserver::new(writer);

    let t0 = Instant::now();
    let summary = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    let stats = &summary.stats;
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  final tick      : {}", summary.final_tick);
    println!("  delivered       : {}", stats.delivered);
    println!("  rejected        : {}", stats.rejected);
    println!("  undelivered     : {}", summary.undelivered);
    println!("  total distance  : {} floors", stats.total_distance);
    if let Some(mean) = stats.mean_wait_ticks() {
        println!("  mean wait       : {mean:.2} ticks");
    }
    println!("  max wait        : {} ticks", stats.max_wait_ticks);
    println!();

    println!("{:<8} {:>10}", "Robot", "Delivered");
    println!("{}", "-".repeat(19));
    for (robot, count) in &stats.per_robot {
        println!("{:<8} {:>10}", robot.to_string(), count);
    }
    println!();
    println!("Output written to {}", cli.output.display());

    Ok(())
}
