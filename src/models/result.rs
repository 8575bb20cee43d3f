//! Per-process timing results and their means.

use serde::{Deserialize, Serialize};

use super::{Process, ProcessId, Time};

/// Observed timing of one finished process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub id: ProcessId,
    pub arrival_time: Time,
    pub service_time: Time,
    /// First dispatch time.
    pub start_time: Time,
    /// Completion time.
    pub finish_time: Time,
    /// `finish_time - arrival_time`.
    pub turnaround_time: Time,
    /// `turnaround_time / service_time` (>= 1).
    pub normalized_turnaround: f64,
    /// `start_time - arrival_time`.
    pub response_time: Time,
}

impl ProcessResult {
    /// Derives the result of a finished process.
    ///
    /// Returns `None` if the process has not been both started and finished.
    pub fn from_process(process: &Process) -> Option<Self> {
        if !process.is_finished() {
            return None;
        }
        let start_time = process.start_time?;
        let finish_time = process.finish_time?;
        let turnaround_time = finish_time - process.arrival_time;

        Some(Self {
            id: process.id,
            arrival_time: process.arrival_time,
            service_time: process.service_time,
            start_time,
            finish_time,
            turnaround_time,
            normalized_turnaround: turnaround_time as f64 / process.service_time as f64,
            response_time: start_time - process.arrival_time,
        })
    }
}

/// Unweighted means of the derived fields over all results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanStatistics {
    pub mean_turnaround: f64,
    pub mean_normalized_turnaround: f64,
    pub mean_response: f64,
}

impl MeanStatistics {
    /// Computes the means. All zero for an empty slice.
    pub fn from_results(results: &[ProcessResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let n = results.len() as f64;
        let (turnaround, normalized, response) =
            results
                .iter()
                .fold((0.0, 0.0, 0.0), |(t, nt, r), result| {
                    (
                        t + result.turnaround_time as f64,
                        nt + result.normalized_turnaround,
                        r + result.response_time as f64,
                    )
                });

        Self {
            mean_turnaround: turnaround / n,
            mean_normalized_turnaround: normalized / n,
            mean_response: response / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessSpec, ProcessState};

    fn finished(id: ProcessId, arrival: Time, service: Time, start: Time, finish: Time) -> Process {
        let mut p = Process::from_spec(&ProcessSpec::new(id, arrival, service));
        p.state = ProcessState::Finished;
        p.remaining_time = 0;
        p.start_time = Some(start);
        p.finish_time = Some(finish);
        p
    }

    #[test]
    fn test_from_process() {
        let result = ProcessResult::from_process(&finished(2, 1, 3, 5, 8)).unwrap();
        assert_eq!(result.turnaround_time, 7);
        assert_eq!(result.response_time, 4);
        assert!((result.normalized_turnaround - 7.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_unfinished_has_no_result() {
        let p = Process::from_spec(&ProcessSpec::new(1, 0, 3));
        assert!(ProcessResult::from_process(&p).is_none());
    }

    #[test]
    fn test_means() {
        let results = vec![
            ProcessResult::from_process(&finished(1, 0, 5, 0, 5)).unwrap(),
            ProcessResult::from_process(&finished(2, 1, 3, 5, 8)).unwrap(),
        ];
        let means = MeanStatistics::from_results(&results);
        assert!((means.mean_turnaround - 6.0).abs() < 1e-10); // (5+7)/2
        assert!((means.mean_normalized_turnaround - (1.0 + 7.0 / 3.0) / 2.0).abs() < 1e-10);
        assert!((means.mean_response - 2.0).abs() < 1e-10); // (0+4)/2
    }

    #[test]
    fn test_means_empty() {
        let means = MeanStatistics::from_results(&[]);
        assert_eq!(means, MeanStatistics::default());
        assert_eq!(means.mean_turnaround, 0.0);
    }
}
