//! Error types.
//!
//! Configuration and process-list problems are reported before a run
//! starts. Deadlocks and state-machine violations are reported from inside
//! the run; none of them are retried.

use std::fmt;
use thiserror::Error;

use crate::models::{ProcessId, ProcessState, Time};
use crate::validation::ValidationError;

/// Invalid scheduler configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Algorithm name not recognized.
    #[error("Unsupported scheduling algorithm: '{0}'")]
    UnsupportedAlgorithm(String),

    /// RR selected without a quantum.
    #[error("Round-robin requires a quantum")]
    MissingQuantum,

    /// RR quantum is zero or negative.
    #[error("Quantum must be positive, got {0}")]
    NonPositiveQuantum(Time),

    /// HRRN selected without an aging weight.
    #[error("HRRN requires an alpha weight")]
    MissingAlpha,

    /// Aging weight is NaN, infinite or negative.
    #[error("Alpha must be a finite non-negative number, got {0}")]
    InvalidAlpha(f64),
}

/// Why a run stopped with unfinished processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlockReason {
    /// No events left to process.
    QueueExhausted,
    /// The event ceiling was reached.
    EventLimit(u64),
    /// The simulated clock passed the time ceiling.
    TimeLimit(Time),
}

impl fmt::Display for DeadlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueExhausted => f.write_str("event queue exhausted"),
            Self::EventLimit(n) => write!(f, "event limit of {n} exceeded"),
            Self::TimeLimit(t) => write!(f, "time limit of {t} exceeded"),
        }
    }
}

/// Errors raised while preparing or running a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Scheduler configuration rejected.
    #[error("Invalid scheduler configuration: {0}")]
    Config(#[from] ConfigError),

    /// Process list rejected. Carries every problem found.
    #[error("Invalid process list: {}", join_errors(.0))]
    InvalidProcesses(Vec<ValidationError>),

    /// Run ended while processes were still unfinished.
    #[error("Simulation deadlock at t={clock} ({reason}); unfinished processes: {unfinished:?}")]
    Deadlock {
        clock: Time,
        reason: DeadlockReason,
        unfinished: Vec<ProcessId>,
    },

    /// A process was asked to take an edge outside its state machine.
    #[error("Process {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: ProcessId,
        from: ProcessState,
        to: ProcessState,
    },

    /// An event or dispatch decision named a process the engine does not own.
    #[error("Unknown process {0}")]
    UnknownProcess(ProcessId),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while reading scheduler or process files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Scheduler file names an invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A line could not be parsed.
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_deadlock_message() {
        let err = SimError::Deadlock {
            clock: 12,
            reason: DeadlockReason::EventLimit(100),
            unfinished: vec![3, 4],
        };
        assert_eq!(
            err.to_string(),
            "Simulation deadlock at t=12 (event limit of 100 exceeded); unfinished processes: [3, 4]"
        );
    }

    #[test]
    fn test_invalid_processes_message() {
        let err = SimError::InvalidProcesses(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate process ID: 1"),
            ValidationError::new(ValidationErrorKind::NonPositiveService, "bad service"),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid process list: Duplicate process ID: 1; bad service"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: SimError = ConfigError::MissingQuantum.into();
        assert_eq!(
            err.to_string(),
            "Invalid scheduler configuration: Round-robin requires a quantum"
        );
    }
}
