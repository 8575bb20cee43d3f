//! CPU scheduling simulator CLI
//!
//! Runs one simulation and prints the per-process statistics table.
//!
//! # Example
//!
//! ```bash
//! # Simulate a process file under the policy in scheduler.txt
//! u-cpusched scheduler.txt processes.txt
//!
//! # Simulate a generated workload spanning 50 ticks, with the run timeline
//! u-cpusched scheduler.txt --random 50 --seed 7 --timeline
//! ```

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use u_cpusched::models::SimulationLimits;
use u_cpusched::workload::{self, WorkloadConfig};
use u_cpusched::{loader, report};

/// CPU scheduling simulator
///
/// Simulates FCFS, RR, SPN or HRRN dispatch on a single CPU in logical
/// time. Output is deterministic for the same inputs.
#[derive(Parser, Debug)]
#[command(name = "u-cpusched")]
#[command(version, about, long_about = None)]
struct Args {
    /// Scheduler file: algorithm name, then key=value settings
    scheduler_file: String,

    /// Process file: one `id arrival service` triple per line
    #[arg(required_unless_present = "random", conflicts_with = "random")]
    process_file: Option<String>,

    /// Abort after handling this many events
    #[arg(long)]
    max_events: Option<u64>,

    /// Abort once the clock passes this time
    #[arg(long)]
    max_time: Option<i64>,

    /// Print the CPU run slices after the table
    #[arg(long)]
    timeline: bool,

    /// Generate a random workload with arrivals over this many ticks
    #[arg(long, value_name = "TICKS")]
    random: Option<i64>,

    /// Seed for --random
    #[arg(long, default_value = "0")]
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,u_cpusched=info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = loader::load_scheduler_config(&args.scheduler_file)?;

    let specs = match (&args.process_file, args.random) {
        (_, Some(horizon)) => {
            info!(horizon, seed = args.seed, "Generating workload");
            workload::generate(&WorkloadConfig::default().with_horizon(horizon), args.seed)
        }
        (Some(path), None) => loader::load_process_list(path)?,
        (None, None) => return Err("no process file given".into()),
    };

    let mut limits = SimulationLimits::unbounded();
    if let Some(max_events) = args.max_events {
        limits = limits.with_max_events(max_events);
    }
    if let Some(max_time) = args.max_time {
        limits = limits.with_max_time(max_time);
    }

    info!(
        algorithm = %config.algorithm,
        processes = specs.len(),
        "Starting simulation"
    );

    let result = u_cpusched::simulate_with_limits(&config, &specs, limits)?;

    print!("{}", report::render(&result));
    if args.timeline {
        println!();
        println!("Timeline:");
        print!("{}", report::render_timeline(&result.schedule));
    }
    Ok(())
}
