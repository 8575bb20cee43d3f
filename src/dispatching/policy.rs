//! Dispatch policies for the four supported algorithms.
//!
//! A policy bundles a selection rule chain with a run-length rule:
//!
//! | Algorithm | Selection | Run length |
//! |-----------|-----------|------------|
//! | FCFS | min arrival → min id | full remaining |
//! | RR | ready-set FIFO | `min(quantum, remaining)` |
//! | SPN | min service → min arrival → min id | full remaining |
//! | HRRN | max response ratio → min id | full remaining |

use tracing::trace;

use super::{rules, DispatchContext, RuleEngine};
use crate::error::ConfigError;
use crate::models::{Algorithm, Process, ProcessId, SchedulerConfig, Time};

/// The dispatch strategy used by the simulation engine.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::DispatchPolicy;
/// use u_cpusched::models::{Process, ProcessSpec, SchedulerConfig};
///
/// let policy = DispatchPolicy::from_config(&SchedulerConfig::round_robin(2)).unwrap();
/// let p = Process::from_spec(&ProcessSpec::new(1, 0, 5));
/// assert_eq!(policy.run_length(&p), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    algorithm: Algorithm,
    engine: RuleEngine,
    quantum: Option<Time>,
}

impl DispatchPolicy {
    /// Builds the policy described by a validated configuration.
    pub fn from_config(config: &SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let engine = match config.algorithm {
            Algorithm::Fcfs => RuleEngine::new().with_rule(rules::ArrivalTime),
            Algorithm::RoundRobin => RuleEngine::new().with_rule(rules::ReadyOrder),
            Algorithm::Spn => RuleEngine::new()
                .with_rule(rules::ShortestService)
                .with_rule(rules::ArrivalTime),
            // alpha offsets every candidate's ratio equally; validated above
            Algorithm::Hrrn => RuleEngine::new().with_rule(rules::ResponseRatio),
        };
        // A quantum on a non-preemptive algorithm is accepted and ignored.
        let quantum = config
            .quantum
            .filter(|_| config.algorithm.is_preemptive());

        Ok(Self {
            algorithm: config.algorithm,
            engine,
            quantum,
        })
    }

    /// The algorithm this policy implements.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Picks the next process to run from the ready set.
    ///
    /// Returns `None` only when `ready` is empty.
    pub fn select_next(&self, ready: &[&Process], current_time: Time) -> Option<ProcessId> {
        let context = DispatchContext::at_time(current_time);
        let chosen = ready[self.engine.select_best(ready, &context)?];
        trace!(
            now = current_time,
            process = chosen.id,
            candidates = ready.len(),
            scores = ?self.engine.evaluate(chosen, &context),
            "selected"
        );
        Some(chosen.id)
    }

    /// How long `process` keeps the CPU once dispatched.
    pub fn run_length(&self, process: &Process) -> Time {
        match self.quantum {
            Some(quantum) => quantum.min(process.remaining_time),
            None => process.remaining_time,
        }
    }
}
