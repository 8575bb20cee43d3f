//! Scheduler and process file loading.
//!
//! # Scheduler file
//!
//! ```text
//! RR
//! quantum=4
//! ```
//!
//! The first non-blank line names the algorithm; the rest are `key=value`
//! pairs (`quantum`, `alpha`). Unknown keys are logged and ignored.
//!
//! # Process file
//!
//! ```text
//! # id arrival service
//! 1 0 5
//! 2 1 3
//! ```
//!
//! One process per line as three whitespace-separated integers. Blank
//! lines and `#` comments are skipped.

use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::LoadError;
use crate::models::{Algorithm, ProcessId, ProcessSpec, SchedulerConfig, Time};

/// Parses scheduler file contents and validates the result.
pub fn parse_scheduler_config(input: &str) -> Result<SchedulerConfig, LoadError> {
    let mut lines = meaningful_lines(input);

    let (_, first) = lines.next().ok_or_else(|| LoadError::Parse {
        line: 1,
        reason: "missing algorithm name".into(),
    })?;
    let mut config = SchedulerConfig::new(first.parse::<Algorithm>()?);

    for (line, text) in lines {
        let (key, value) = text.split_once('=').ok_or_else(|| LoadError::Parse {
            line,
            reason: format!("expected key=value, got '{text}'"),
        })?;
        let (key, value) = (key.trim(), value.trim());

        match key.to_ascii_lowercase().as_str() {
            "quantum" => {
                config.quantum = Some(value.parse::<Time>().map_err(|e| LoadError::Parse {
                    line,
                    reason: format!("invalid quantum '{value}': {e}"),
                })?);
            }
            "alpha" => {
                config.alpha = Some(value.parse::<f64>().map_err(|e| LoadError::Parse {
                    line,
                    reason: format!("invalid alpha '{value}': {e}"),
                })?);
            }
            _ => warn!(line, key, "ignoring unknown scheduler setting"),
        }
    }

    config.validate()?;
    Ok(config)
}

/// Parses process file contents.
///
/// Only syntax is checked here; semantic checks (duplicate IDs, ranges)
/// belong to [`crate::validation::validate_processes`].
pub fn parse_process_list(input: &str) -> Result<Vec<ProcessSpec>, LoadError> {
    meaningful_lines(input)
        .map(|(line, text)| {
            let fields: Vec<&str> = text.split_whitespace().collect();
            let [id, arrival, service] = fields.as_slice() else {
                return Err(LoadError::Parse {
                    line,
                    reason: format!("expected 3 fields (id arrival service), got {}", fields.len()),
                });
            };
            let number = |name: &str, raw: &str| {
                raw.parse::<Time>().map_err(|e| LoadError::Parse {
                    line,
                    reason: format!("invalid {name} '{raw}': {e}"),
                })
            };
            let id = id.parse::<ProcessId>().map_err(|e| LoadError::Parse {
                line,
                reason: format!("invalid id '{id}': {e}"),
            })?;
            Ok(ProcessSpec::new(
                id,
                number("arrival time", arrival)?,
                number("service time", service)?,
            ))
        })
        .collect()
}

/// Reads and parses a scheduler file.
pub fn load_scheduler_config(path: impl AsRef<Path>) -> Result<SchedulerConfig, LoadError> {
    parse_scheduler_config(&fs::read_to_string(path)?)
}

/// Reads and parses a process file.
pub fn load_process_list(path: impl AsRef<Path>) -> Result<Vec<ProcessSpec>, LoadError> {
    parse_process_list(&fs::read_to_string(path)?)
}

/// Non-blank, non-comment lines with 1-based line numbers.
fn meaningful_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(idx, raw)| {
            let text = raw.split('#').next().unwrap_or_default().trim();
            (idx + 1, text)
        })
        .filter(|(_, text)| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_scheduler_rr() {
        let config = parse_scheduler_config("RR\nquantum=4\n").unwrap();
        assert_eq!(config, SchedulerConfig::round_robin(4));
    }

    #[test]
    fn test_scheduler_hrrn_with_spacing_and_comments() {
        let input = "# policy\n\n  hrrn  \n alpha = 1.5 # aging\nquantum=2\n";
        let config = parse_scheduler_config(input).unwrap();
        assert_eq!(config.algorithm, Algorithm::Hrrn);
        assert_eq!(config.alpha, Some(1.5));
        assert_eq!(config.quantum, Some(2));
    }

    #[test]
    fn test_scheduler_unknown_key_ignored() {
        let config = parse_scheduler_config("FCFS\nverbose=yes\n").unwrap();
        assert_eq!(config, SchedulerConfig::fcfs());
    }

    #[test]
    fn test_scheduler_errors() {
        assert!(matches!(
            parse_scheduler_config(""),
            Err(LoadError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_scheduler_config("LOTTERY\n"),
            Err(LoadError::Config(ConfigError::UnsupportedAlgorithm(_)))
        ));
        assert!(matches!(
            parse_scheduler_config("RR\n"),
            Err(LoadError::Config(ConfigError::MissingQuantum))
        ));
        assert!(matches!(
            parse_scheduler_config("RR\nquantum=0\n"),
            Err(LoadError::Config(ConfigError::NonPositiveQuantum(0)))
        ));
        assert!(matches!(
            parse_scheduler_config("RR\nquantum=two\n"),
            Err(LoadError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_scheduler_config("HRRN\nalpha\n"),
            Err(LoadError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_process_list() {
        let input = "# id arrival service\n1 0 5\n\n2\t1   3\n";
        let specs = parse_process_list(input).unwrap();
        assert_eq!(specs, vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)]);
    }

    #[test]
    fn test_process_list_keeps_semantic_errors_for_validation() {
        let specs = parse_process_list("1 -2 0\n").unwrap();
        assert_eq!(specs, vec![ProcessSpec::new(1, -2, 0)]);
    }

    #[test]
    fn test_process_list_errors() {
        match parse_process_list("1 0 5\n2 1\n") {
            Err(LoadError::Parse { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("expected 3 fields"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            parse_process_list("x 0 5\n"),
            Err(LoadError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_process_list("1 0 5.5\n"),
            Err(LoadError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_process_list("/nonexistent/u-cpusched/processes.txt"),
            Err(LoadError::Io(_))
        ));
    }
}
