//! Plain-text rendering of simulation reports.
//!
//! Produces the tab-separated statistics table and mean block printed by
//! the CLI, plus an optional run-slice timeline.

use std::fmt::Write;

use crate::models::{Schedule, SliceOutcome};
use crate::statistics::SimulationReport;

const HEADER: [&str; 8] = [
    "ProcessID",
    "Arrival Time",
    "Service Time",
    "Start Time",
    "Finish Time",
    "Turnaround Time",
    "Normalized Turnaround Time",
    "Response Time",
];

/// Renders the per-process table followed by the mean statistics.
pub fn render(report: &SimulationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Algorithm: {}", report.algorithm);
    let _ = writeln!(out, "{}", HEADER.join("\t"));

    for r in &report.results {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{}",
            r.id,
            r.arrival_time,
            r.service_time,
            r.start_time,
            r.finish_time,
            r.turnaround_time,
            r.normalized_turnaround,
            r.response_time,
        );
    }

    let means = &report.means;
    let _ = writeln!(out);
    let _ = writeln!(out, "Mean Statistics:");
    let _ = writeln!(out, "Mean Turnaround Time: {:.2}", means.mean_turnaround);
    let _ = writeln!(
        out,
        "Mean Normalized Turnaround Time: {:.2}",
        means.mean_normalized_turnaround
    );
    let _ = writeln!(out, "Mean Response Time: {:.2}", means.mean_response);
    let _ = writeln!(out, "Makespan: {}", report.makespan);
    let _ = writeln!(out, "CPU Utilization: {:.2}%", report.cpu_utilization * 100.0);
    out
}

/// Renders one line per run slice: `[start, end) P<id> <outcome>`.
pub fn render_timeline(schedule: &Schedule) -> String {
    let mut out = String::new();
    for slice in &schedule.slices {
        let outcome = match slice.outcome {
            SliceOutcome::Completed => "done",
            SliceOutcome::Preempted => "preempted",
        };
        let _ = writeln!(
            out,
            "[{}, {})\tP{}\t{}",
            slice.start, slice.end, slice.process_id, outcome
        );
    }
    out
}
