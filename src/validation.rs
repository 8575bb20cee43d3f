//! Input validation for process lists.
//!
//! Checks structural integrity of the process list before a
//! simulation starts. Detects:
//! - Duplicate IDs
//! - Negative arrival times
//! - Zero or negative service times
//! - Lists whose run would pass the largest representable time
//!
//! Every problem is reported, not only the first one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::models::{ProcessSpec, Time};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires no CPU time, or less than none.
    NonPositiveService,
    /// The simulated clock could overflow `Time`.
    TimeOverflow,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process list.
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. `arrival_time >= 0`
/// 3. `service_time > 0`
/// 4. `arrival_time + service_time` fits in `Time`, and so does the latest
///    possible finish of the whole list (see [`latest_possible_finish`])
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(specs: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for spec in specs {
        if !ids.insert(spec.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", spec.id),
            ));
        }

        if spec.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process {} has negative arrival time {}",
                    spec.id, spec.arrival_time
                ),
            ));
        }

        if spec.service_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveService,
                format!(
                    "Process {} has non-positive service time {}",
                    spec.id, spec.service_time
                ),
            ));
        } else if spec.arrival_time >= 0
            && spec.arrival_time.checked_add(spec.service_time).is_none()
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::TimeOverflow,
                format!(
                    "Process {} cannot finish: arrival {} + service {} overflows",
                    spec.id, spec.arrival_time, spec.service_time
                ),
            ));
        }
    }

    if errors.is_empty() && latest_possible_finish(specs).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total service time overflows",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on every clock value a run can reach: the latest arrival
/// plus the total service time. `None` when that overflows `Time`.
///
/// The CPU never idles while work is ready, so no completion can come later.
pub fn latest_possible_finish(specs: &[ProcessSpec]) -> Option<Time> {
    let latest_arrival = specs.iter().map(|s| s.arrival_time).max().unwrap_or(0);
    specs
        .iter()
        .try_fold(latest_arrival, |acc, s| acc.checked_add(s.service_time))
}
