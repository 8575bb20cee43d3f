//! CPU scheduling simulation for the U-Engine ecosystem.
//!
//! Simulates a single CPU in logical time under a pluggable dispatch
//! policy and reports exact per-process timing statistics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessSpec`, `Process`, `SchedulerConfig`,
//!   `ProcessResult`, `MeanStatistics`, `Schedule`
//! - **`dispatching`**: Dispatching rules, rule engine and the FCFS / RR /
//!   SPN / HRRN dispatch policies
//! - **`simulation`**: Event queue and discrete-event engine
//! - **`statistics`**: Result derivation and aggregation
//! - **`validation`**: Process list checks (duplicate IDs, time ranges)
//! - **`loader`**, **`report`**: Legacy text file formats and table output
//! - **`workload`**: Seeded random process lists
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::{ProcessSpec, SchedulerConfig};
//!
//! let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
//! let report = u_cpusched::simulate(&SchedulerConfig::round_robin(2), &specs).unwrap();
//!
//! assert_eq!(report.results[1].finish_time, 7);
//! assert!((report.means.mean_turnaround - 7.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 9
//! - Banks et al. (2010), "Discrete-Event System Simulation"

pub mod dispatching;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod simulation;
pub mod statistics;
pub mod validation;
pub mod workload;

pub use error::{ConfigError, LoadError, SimError};
pub use statistics::SimulationReport;

use models::{ProcessSpec, SchedulerConfig, SimulationLimits};
use simulation::SimulationEngine;

/// Validates the inputs and runs a simulation to completion.
pub fn simulate(
    config: &SchedulerConfig,
    specs: &[ProcessSpec],
) -> Result<SimulationReport, SimError> {
    simulate_with_limits(config, specs, SimulationLimits::unbounded())
}

/// Like [`simulate`], aborting with a deadlock error past the given ceilings.
pub fn simulate_with_limits(
    config: &SchedulerConfig,
    specs: &[ProcessSpec],
    limits: SimulationLimits,
) -> Result<SimulationReport, SimError> {
    SimulationEngine::new(config, specs)?
        .with_limits(limits)
        .run()
}
