//! Discrete-event simulation engine.
//!
//! # Algorithm
//!
//! 1. Seed the event queue with one Arrival per process.
//! 2. Pop the earliest event and advance the clock to its timestamp.
//! 3. Apply it: Arrival puts the process in the ready set; Completion and
//!    Preempt release the CPU (Preempt also re-queues the process).
//! 4. Once every event at the current instant has been applied, hand an idle
//!    CPU to the process the dispatch policy selects and schedule its
//!    Completion or Preempt event.
//! 5. Stop when the queue is empty. Any unfinished process is a deadlock.
//!
//! Processes live in a single arena owned by the engine. The ready set and
//! the CPU slot hold arena indices, never copies.

use std::collections::HashMap;
use tracing::{debug, info, trace, warn};

use super::event::{Event, EventKind, EventQueue};
use crate::dispatching::DispatchPolicy;
use crate::error::{DeadlockReason, SimError};
use crate::models::{
    Process, ProcessId, ProcessSpec, ProcessState, RunSlice, Schedule, SchedulerConfig,
    SimulationLimits, SliceOutcome, Time,
};
use crate::statistics::{SimulationReport, StatisticsCollector};
use crate::validation::validate_processes;

/// The process currently holding the CPU.
#[derive(Debug, Clone, Copy)]
struct RunningSlot {
    slot: usize,
    since: Time,
    run_length: Time,
}

/// Single-CPU scheduling simulation.
///
/// # Example
///
/// ```
/// use u_cpusched::models::{ProcessSpec, SchedulerConfig};
/// use u_cpusched::simulation::SimulationEngine;
///
/// let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
/// let engine = SimulationEngine::new(&SchedulerConfig::fcfs(), &specs).unwrap();
/// let report = engine.run().unwrap();
///
/// assert_eq!(report.results[0].turnaround_time, 5);
/// assert_eq!(report.results[1].turnaround_time, 7);
/// ```
#[derive(Debug)]
pub struct SimulationEngine {
    policy: DispatchPolicy,
    limits: SimulationLimits,
    clock: Time,
    queue: EventQueue,
    processes: Vec<Process>,
    slots: HashMap<ProcessId, usize>,
    ready: Vec<usize>,
    running: Option<RunningSlot>,
    next_ready_seq: u64,
    schedule: Schedule,
    events_processed: u64,
}

impl SimulationEngine {
    /// Validates the inputs and seeds the event queue.
    ///
    /// Fails fast with `SimError::Config` or `SimError::InvalidProcesses`;
    /// nothing is simulated on error.
    pub fn new(config: &SchedulerConfig, specs: &[ProcessSpec]) -> Result<Self, SimError> {
        let policy = DispatchPolicy::from_config(config)?;
        validate_processes(specs).map_err(SimError::InvalidProcesses)?;

        let mut queue = EventQueue::new();
        let mut processes = Vec::with_capacity(specs.len());
        let mut slots = HashMap::with_capacity(specs.len());

        for (slot, spec) in specs.iter().enumerate() {
            processes.push(Process::from_spec(spec));
            slots.insert(spec.id, slot);
            queue.push(spec.arrival_time, EventKind::Arrival, spec.id);
        }

        Ok(Self {
            policy,
            limits: SimulationLimits::unbounded(),
            clock: 0,
            queue,
            processes,
            slots,
            ready: Vec::new(),
            running: None,
            next_ready_seq: 0,
            schedule: Schedule::new(),
            events_processed: 0,
        })
    }

    /// Sets event and time ceilings for the run.
    pub fn with_limits(mut self, limits: SimulationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Current simulated time.
    pub fn now(&self) -> Time {
        self.clock
    }

    /// The process arena, in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// CPU timeline so far.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// ID of the process holding the CPU, if any.
    pub fn running(&self) -> Option<ProcessId> {
        self.running.map(|run| self.processes[run.slot].id)
    }

    /// IDs in the ready set, in insertion order.
    pub fn ready(&self) -> Vec<ProcessId> {
        self.ready.iter().map(|&slot| self.processes[slot].id).collect()
    }

    /// Number of events handled so far.
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Whether every process has finished.
    pub fn is_complete(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }

    /// Handles the next event, dispatching if it closes out the current instant.
    ///
    /// Returns `Ok(None)` once the queue is empty.
    pub fn step(&mut self) -> Result<Option<Event>, SimError> {
        let Some(event) = self.queue.pop() else {
            return Ok(None);
        };

        if let Some(max_events) = self.limits.max_events {
            if self.events_processed >= max_events {
                return Err(self.deadlock(DeadlockReason::EventLimit(max_events)));
            }
        }
        if let Some(max_time) = self.limits.max_time {
            if event.timestamp > max_time {
                return Err(self.deadlock(DeadlockReason::TimeLimit(max_time)));
            }
        }

        debug_assert!(event.timestamp >= self.clock, "clock must never rewind");
        self.clock = event.timestamp;
        self.events_processed += 1;

        debug!(
            now = self.clock,
            kind = ?event.kind,
            process = event.process_id,
            seq = event.sequence,
            pending = self.queue.len(),
            "handling event"
        );

        match event.kind {
            EventKind::Arrival => self.on_arrival(event.process_id)?,
            EventKind::Completion | EventKind::Preempt => self.on_release(event)?,
        }

        if self.queue.peek_time() != Some(self.clock) {
            self.dispatch_if_idle()?;
        }

        Ok(Some(event))
    }

    /// Runs to completion and collects statistics.
    pub fn run(mut self) -> Result<SimulationReport, SimError> {
        info!(
            algorithm = %self.policy.algorithm(),
            processes = self.processes.len(),
            "starting simulation"
        );

        while self.step()?.is_some() {}

        if !self.is_complete() {
            return Err(self.deadlock(DeadlockReason::QueueExhausted));
        }

        info!(
            total_events = self.events_processed,
            final_time = self.clock,
            "simulation complete"
        );

        Ok(StatisticsCollector::collect(
            self.policy.algorithm(),
            &self.processes,
            self.schedule,
            self.events_processed,
        ))
    }

    fn on_arrival(&mut self, id: ProcessId) -> Result<(), SimError> {
        let slot = self.slot(id)?;
        let seq = self.take_ready_seq();
        self.processes[slot].arrive(self.clock, seq)?;
        self.ready.push(slot);
        trace!(process = id, ready = self.ready.len(), "process ready");
        Ok(())
    }

    fn on_release(&mut self, event: Event) -> Result<(), SimError> {
        let slot = self.slot(event.process_id)?;
        let run = match self.running {
            Some(run) if run.slot == slot => run,
            _ => {
                let to = match event.kind {
                    EventKind::Completion => ProcessState::Finished,
                    _ => ProcessState::Ready,
                };
                return Err(SimError::InvalidTransition {
                    id: event.process_id,
                    from: self.processes[slot].state,
                    to,
                });
            }
        };
        debug_assert_eq!(run.since + run.run_length, self.clock);

        self.running = None;
        self.processes[slot].consume(run.run_length)?;

        let outcome = if event.kind == EventKind::Completion {
            self.processes[slot].complete(self.clock)?;
            SliceOutcome::Completed
        } else {
            let seq = self.take_ready_seq();
            self.processes[slot].preempt(self.clock, seq)?;
            self.ready.push(slot);
            SliceOutcome::Preempted
        };

        self.schedule.add_slice(RunSlice {
            process_id: event.process_id,
            start: run.since,
            end: self.clock,
            outcome,
        });
        Ok(())
    }

    fn dispatch_if_idle(&mut self) -> Result<(), SimError> {
        if self.running.is_some() || self.ready.is_empty() {
            return Ok(());
        }

        let candidates: Vec<&Process> = self.ready.iter().map(|&s| &self.processes[s]).collect();
        let Some(id) = self.policy.select_next(&candidates, self.clock) else {
            return Ok(());
        };

        let pos = self
            .ready
            .iter()
            .position(|&s| self.processes[s].id == id)
            .ok_or(SimError::UnknownProcess(id))?;
        let slot = self.ready.remove(pos);

        let process = &mut self.processes[slot];
        process.dispatch(self.clock)?;
        let run_length = self.policy.run_length(process);
        let kind = if run_length == process.remaining_time {
            EventKind::Completion
        } else {
            EventKind::Preempt
        };

        // Never past `latest_possible_finish`, which validation bounded.
        let until = self.clock + run_length;
        self.queue.push(until, kind, id);
        self.running = Some(RunningSlot {
            slot,
            since: self.clock,
            run_length,
        });

        debug!(
            now = self.clock,
            process = id,
            run_length,
            until,
            next = ?kind,
            "dispatched"
        );
        Ok(())
    }

    fn slot(&self, id: ProcessId) -> Result<usize, SimError> {
        self.slots
            .get(&id)
            .copied()
            .ok_or(SimError::UnknownProcess(id))
    }

    fn take_ready_seq(&mut self) -> u64 {
        let seq = self.next_ready_seq;
        self.next_ready_seq += 1;
        seq
    }

    fn deadlock(&self, reason: DeadlockReason) -> SimError {
        let unfinished: Vec<ProcessId> = self
            .processes
            .iter()
            .filter(|p| !p.is_finished())
            .map(|p| p.id)
            .collect();
        warn!(
            now = self.clock,
            %reason,
            unfinished = unfinished.len(),
            "simulation stopped with unfinished processes"
        );
        SimError::Deadlock {
            clock: self.clock,
            reason,
            unfinished,
        }
    }
}
