//! Built-in dispatching rules.
//!
//! | Rule | Score | Used by |
//! |------|-------|---------|
//! | `ArrivalTime` | arrival time | FCFS, SPN tie-break |
//! | `ReadyOrder` | ready-set entry sequence | RR |
//! | `ShortestService` | total service time | SPN |
//! | `ResponseRatio` | negated `waited / service` (exact) | HRRN |
//!
//! # Score Convention
//! All rules return lower scores for higher priority processes. Scores are
//! exact integers or rationals; see [`RuleScore`](super::RuleScore).
//!
//! # References
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 9
//! - Brinch Hansen (1971), "Short-term scheduling in multiprogramming systems"

use super::{DispatchContext, DispatchingRule, RuleScore};
use crate::models::Process;

/// Earliest arrival first.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalTime;

impl DispatchingRule for ArrivalTime {
    fn name(&self) -> &'static str {
        "ARRIVAL"
    }

    fn evaluate(&self, process: &Process, _context: &DispatchContext) -> RuleScore {
        RuleScore::whole(process.arrival_time)
    }
}

/// Ready-set FIFO.
///
/// Scores by the sequence number assigned each time a process enters the
/// ready set, so a preempted process goes behind everything already waiting.
#[derive(Debug, Clone, Copy)]
pub struct ReadyOrder;

impl DispatchingRule for ReadyOrder {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &Process, _context: &DispatchContext) -> RuleScore {
        RuleScore::whole(process.ready_seq)
    }
}

/// Shortest total service time first.
///
/// Uses the full burst, not the remaining time.
#[derive(Debug, Clone, Copy)]
pub struct ShortestService;

impl DispatchingRule for ShortestService {
    fn name(&self) -> &'static str {
        "SPN"
    }

    fn evaluate(&self, process: &Process, _context: &DispatchContext) -> RuleScore {
        RuleScore::whole(process.service_time)
    }
}

/// Highest response ratio first.
///
/// `ratio = (waited + alpha * service_time) / service_time`, where
/// `waited = current_time - arrival_time`. That equals
/// `waited / service_time + alpha`, and `alpha` is the same for every
/// candidate, so the rule scores the exact rational `-waited / service_time`.
/// The ratio of a waiting process grows strictly with time, so it
/// eventually beats any newcomer.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRatio;

impl DispatchingRule for ResponseRatio {
    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn evaluate(&self, process: &Process, context: &DispatchContext) -> RuleScore {
        // Higher ratio = higher priority → negate
        RuleScore::ratio(-process.waited(context.current_time), process.service_time)
    }
}
