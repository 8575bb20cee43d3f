//! Simulation statistics.
//!
//! Derives per-process timing results from finished processes and
//! aggregates them into a report.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | finish - arrival |
//! | Normalized Turnaround | turnaround / service |
//! | Response | first dispatch - arrival |
//! | Makespan | latest finish time |
//! | CPU Utilization | busy time / makespan |
//!
//! # Reference
//! Stallings (2018), "Operating Systems", Ch. 9.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{Algorithm, MeanStatistics, Process, ProcessResult, Schedule, Time};

/// Outcome of a completed simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Algorithm that produced this run.
    pub algorithm: Algorithm,
    /// Per-process results in input order.
    pub results: Vec<ProcessResult>,
    /// Means over `results`.
    pub means: MeanStatistics,
    /// CPU timeline.
    pub schedule: Schedule,
    /// Latest finish time.
    pub makespan: Time,
    /// Busy time over makespan (0.0..=1.0). Zero when nothing ran.
    pub cpu_utilization: f64,
    /// Events handled by the engine.
    pub events_processed: u64,
}

/// Builds reports from the engine's final state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsCollector;

impl StatisticsCollector {
    /// Results for every finished process, in arena order.
    pub fn results(processes: &[Process]) -> Vec<ProcessResult> {
        processes
            .iter()
            .filter_map(ProcessResult::from_process)
            .collect()
    }

    /// Assembles the full report.
    pub fn collect(
        algorithm: Algorithm,
        processes: &[Process],
        schedule: Schedule,
        events_processed: u64,
    ) -> SimulationReport {
        let results = Self::results(processes);
        let means = MeanStatistics::from_results(&results);
        let makespan = results.iter().map(|r| r.finish_time).max().unwrap_or(0);

        SimulationReport {
            algorithm,
            means,
            makespan,
            cpu_utilization: schedule.utilization().unwrap_or(0.0),
            schedule,
            results,
            events_processed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessSpec, ProcessState, RunSlice, SliceOutcome};

    fn finished(id: u32, arrival: Time, service: Time, start: Time, finish: Time) -> Process {
        let mut p = Process::from_spec(&ProcessSpec::new(id, arrival, service));
        p.state = ProcessState::Finished;
        p.remaining_time = 0;
        p.start_time = Some(start);
        p.finish_time = Some(finish);
        p
    }

    #[test]
    fn test_collect() {
        let processes = vec![finished(1, 0, 5, 0, 5), finished(2, 1, 3, 5, 8)];
        let mut schedule = Schedule::new();
        schedule.add_slice(RunSlice {
            process_id: 1,
            start: 0,
            end: 5,
            outcome: SliceOutcome::Completed,
        });
        schedule.add_slice(RunSlice {
            process_id: 2,
            start: 5,
            end: 8,
            outcome: SliceOutcome::Completed,
        });

        let report = StatisticsCollector::collect(Algorithm::Fcfs, &processes, schedule, 4);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.makespan, 8);
        assert!((report.cpu_utilization - 1.0).abs() < 1e-10);
        assert!((report.means.mean_turnaround - 6.0).abs() < 1e-10);
        assert!((report.means.mean_response - 2.0).abs() < 1e-10);
        assert_eq!(report.events_processed, 4);
    }

    #[test]
    fn test_skips_unfinished() {
        let processes = vec![
            finished(1, 0, 2, 0, 2),
            Process::from_spec(&ProcessSpec::new(2, 0, 2)),
        ];
        let results = StatisticsCollector::results(&processes);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn test_empty() {
        let report = StatisticsCollector::collect(Algorithm::Spn, &[], Schedule::new(), 0);
        assert!(report.results.is_empty());
        assert_eq!(report.makespan, 0);
        assert_eq!(report.cpu_utilization, 0.0);
        assert_eq!(report.means, MeanStatistics::default());
    }

    #[test]
    fn test_report_serializes() {
        let report = StatisticsCollector::collect(
            Algorithm::RoundRobin,
            &[finished(1, 0, 2, 0, 2)],
            Schedule::new(),
            2,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["algorithm"], "RR");
        assert_eq!(json["results"][0]["turnaround_time"], 2);
    }
}
