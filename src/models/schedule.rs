//! Execution timeline.
//!
//! A schedule records every interval during which a process held the CPU,
//! in simulated order. It is the observable trace behind the per-process
//! statistics.

use serde::{Deserialize, Serialize};

use super::{ProcessId, Time};

/// How a run slice ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliceOutcome {
    /// The process finished at `end`.
    Completed,
    /// The process was returned to the ready set at `end`.
    Preempted,
}

/// A contiguous interval `[start, end)` of CPU time given to one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSlice {
    pub process_id: ProcessId,
    pub start: Time,
    pub end: Time,
    pub outcome: SliceOutcome,
}

impl RunSlice {
    /// Length of the slice.
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// Ordered CPU timeline of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub slices: Vec<RunSlice>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slice.
    pub fn add_slice(&mut self, slice: RunSlice) {
        self.slices.push(slice);
    }

    /// Latest slice end, or 0 if nothing ran.
    pub fn makespan(&self) -> Time {
        self.slices.iter().map(|s| s.end).max().unwrap_or(0)
    }

    /// Total time the CPU was busy.
    pub fn busy_time(&self) -> Time {
        self.slices.iter().map(RunSlice::duration).sum()
    }

    /// Busy time over makespan. `None` if the makespan is zero.
    pub fn utilization(&self) -> Option<f64> {
        let makespan = self.makespan();
        if makespan <= 0 {
            return None;
        }
        Some(self.busy_time() as f64 / makespan as f64)
    }

    /// All slices run by one process, in order.
    pub fn slices_for(&self, process_id: ProcessId) -> Vec<&RunSlice> {
        self.slices
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }

    /// Process ids in the order they finished.
    pub fn completion_order(&self) -> Vec<ProcessId> {
        self.slices
            .iter()
            .filter(|s| s.outcome == SliceOutcome::Completed)
            .map(|s| s.process_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(id: ProcessId, start: Time, end: Time, outcome: SliceOutcome) -> RunSlice {
        RunSlice {
            process_id: id,
            start,
            end,
            outcome,
        }
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::new();
        assert_eq!(schedule.makespan(), 0);
        assert_eq!(schedule.busy_time(), 0);
        assert!(schedule.utilization().is_none());
        assert!(schedule.completion_order().is_empty());
    }

    #[test]
    fn test_queries() {
        let mut schedule = Schedule::new();
        schedule.add_slice(slice(1, 0, 2, SliceOutcome::Preempted));
        schedule.add_slice(slice(2, 2, 3, SliceOutcome::Completed));
        // idle 3..5
        schedule.add_slice(slice(1, 5, 7, SliceOutcome::Completed));

        assert_eq!(schedule.makespan(), 7);
        assert_eq!(schedule.busy_time(), 5);
        assert!((schedule.utilization().unwrap() - 5.0 / 7.0).abs() < 1e-10);
        assert_eq!(schedule.slices_for(1).len(), 2);
        assert_eq!(schedule.completion_order(), vec![2, 1]);
    }
}
