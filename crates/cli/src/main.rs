//! Demand-paged virtual memory simulator CLI.
//!
//! This binary drives a complete run. It performs:
//! 1. **Setup:** Builds the configuration from flags or a JSON file and pages every job.
//! 2. **Run:** Spawns one worker per job against the shared engine and joins them.
//! 3. **Report:** Prints the setup summary, optional access trace, final frame occupancy, and statistics.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagesim_core::config::{Config, PolicyKind};
use pagesim_core::sim::Simulation;

#[derive(Parser, Debug)]
#[command(
    name = "pagesim",
    author,
    version,
    about = "Concurrent demand-paged virtual memory simulator",
    long_about = "Simulates jobs sharing a fixed pool of physical frames with demand paging\nand LRU or FIFO replacement.\n\nExamples:\n  pagesim --jobs 450,300,700\n  pagesim --jobs 1000 --page-size 200 --total-memory 600 --policy fifo --trace\n  pagesim --config sim.json --jobs 450,300"
)]
struct Cli {
    /// Comma-separated job sizes in bytes, e.g. 450,300,700.
    #[arg(short, long, value_delimiter = ',', required = true)]
    jobs: Vec<u64>,

    /// Page (and frame) size in bytes.
    #[arg(long)]
    page_size: Option<u64>,

    /// Total physical memory in bytes; the frame count rounds up.
    #[arg(long)]
    total_memory: Option<u64>,

    /// Replacement policy: lru or fifo.
    #[arg(long)]
    policy: Option<String>,

    /// Seed for the pseudo-random source.
    #[arg(long)]
    seed: Option<u64>,

    /// Print a trace line for every access.
    #[arg(long)]
    trace: bool,

    /// JSON configuration file; flags override its values.
    #[arg(long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Builds the configuration, runs the simulation, prints the reports.
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    if let Some(v) = cli.page_size {
        config.page_size = v;
    }
    if let Some(v) = cli.total_memory {
        config.total_memory = v;
    }
    if let Some(v) = cli.seed {
        config.seed = v;
    }
    if let Some(p) = &cli.policy {
        config.policy = parse_policy(p)?;
    }
    if cli.trace {
        config.trace_accesses = true;
    }
    config.validate()?;

    let sim = Simulation::new(&config, &cli.jobs)?;
    print_setup(&config, &sim);

    let stats = sim.run()?;

    println!("\nFinal frame occupancy:");
    print!("{}", sim.manager().pool());
    stats.print();
    Ok(())
}

/// Maps a policy name from the command line to its engine kind.
fn parse_policy(name: &str) -> Result<PolicyKind, String> {
    match name.to_ascii_lowercase().as_str() {
        "lru" => Ok(PolicyKind::Lru),
        "fifo" => Ok(PolicyKind::Fifo),
        other => Err(format!("unknown policy '{other}' (expected lru or fifo)")),
    }
}

/// Prints the frame pool summary and each job's page layout.
fn print_setup(config: &Config, sim: &Simulation) {
    let manager = sim.manager();
    println!(
        "Configuration: page_size={} total_memory={} frames={} policy={:?} seed={:#x}",
        config.page_size,
        config.total_memory,
        manager.pool().len(),
        config.policy,
        config.seed,
    );
    for job in manager.jobs() {
        let note = if job.page_count() > manager.pool().len() {
            " [exceeds frame pool: every access will fault]"
        } else {
            ""
        };
        println!(
            "  job {}: {} bytes -> {} pages (internal fragmentation: {} bytes){}",
            job.id,
            job.size,
            job.page_count(),
            job.internal_fragmentation(config.page_size),
            note,
        );
    }
}
