//! Process model.
//!
//! A `ProcessSpec` is the immutable input description of a CPU-bound
//! process. A `Process` is the engine-owned simulation record created from
//! it, carrying remaining work, lifecycle state and observed timestamps.
//!
//! # State Machine
//!
//! ```text
//! Unarrived ──arrive──▶ Ready ──dispatch──▶ Running ──complete──▶ Finished
//!                         ▲                    │
//!                         └─────preempt────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SimError;

/// Process identifier. Dispatch tie-breaks use the natural integer order.
pub type ProcessId = u32;

/// Simulated time in abstract ticks relative to t=0.
pub type Time = i64;

/// Input description of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Time at which the process enters the ready set.
    pub arrival_time: Time,
    /// Total CPU burst required to finish.
    pub service_time: Time,
}

impl ProcessSpec {
    /// Creates a process specification.
    pub fn new(id: ProcessId, arrival_time: Time, service_time: Time) -> Self {
        Self {
            id,
            arrival_time,
            service_time,
        }
    }
}

/// Lifecycle state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    /// Arrival event not yet processed.
    Unarrived,
    /// Waiting in the ready set.
    Ready,
    /// Holding the CPU.
    Running,
    /// All service consumed.
    Finished,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unarrived => "Unarrived",
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Finished => "Finished",
        };
        f.write_str(s)
    }
}

/// Mutable simulation record for one process.
///
/// Only the simulation engine mutates a `Process`, and only through the
/// transition methods below, which reject any edge outside the state
/// machine. Once `Finished` the record is never touched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Arrival time from the `ProcessSpec`.
    pub arrival_time: Time,
    /// Total CPU burst from the `ProcessSpec`.
    pub service_time: Time,
    /// Service not yet simulated. `0 <= remaining_time <= service_time`.
    pub remaining_time: Time,
    /// Current lifecycle state.
    pub state: ProcessState,
    /// First dispatch time. Never overwritten after preemption.
    pub start_time: Option<Time>,
    /// Completion time.
    pub finish_time: Option<Time>,
    /// Last time the process entered the ready set.
    pub last_ready_time: Option<Time>,
    /// Position of the latest ready-set entry (monotonic across the run).
    pub ready_seq: u64,
}

impl Process {
    /// Creates an unarrived process from its specification.
    pub fn from_spec(spec: &ProcessSpec) -> Self {
        Self {
            id: spec.id,
            arrival_time: spec.arrival_time,
            service_time: spec.service_time,
            remaining_time: spec.service_time,
            state: ProcessState::Unarrived,
            start_time: None,
            finish_time: None,
            last_ready_time: None,
            ready_seq: 0,
        }
    }

    /// Whether the process has completed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == ProcessState::Finished
    }

    /// Time spent waiting since arrival at `now`.
    #[inline]
    pub fn waited(&self, now: Time) -> Time {
        now - self.arrival_time
    }

    /// Unarrived → Ready.
    pub fn arrive(&mut self, now: Time, ready_seq: u64) -> Result<(), SimError> {
        self.transition(ProcessState::Unarrived, ProcessState::Ready)?;
        self.last_ready_time = Some(now);
        self.ready_seq = ready_seq;
        Ok(())
    }

    /// Ready → Running. Records `start_time` on the first dispatch only.
    pub fn dispatch(&mut self, now: Time) -> Result<(), SimError> {
        self.transition(ProcessState::Ready, ProcessState::Running)?;
        self.start_time.get_or_insert(now);
        Ok(())
    }

    /// Accounts `run_length` ticks of service that have just been simulated.
    pub fn consume(&mut self, run_length: Time) -> Result<(), SimError> {
        if self.state != ProcessState::Running || run_length > self.remaining_time {
            return Err(self.invalid(ProcessState::Running));
        }
        self.remaining_time -= run_length;
        Ok(())
    }

    /// Running → Finished. Requires all service consumed.
    pub fn complete(&mut self, now: Time) -> Result<(), SimError> {
        if self.remaining_time != 0 {
            return Err(self.invalid(ProcessState::Finished));
        }
        self.transition(ProcessState::Running, ProcessState::Finished)?;
        self.finish_time = Some(now);
        Ok(())
    }

    /// Running → Ready. Requires service left to run.
    pub fn preempt(&mut self, now: Time, ready_seq: u64) -> Result<(), SimError> {
        if self.remaining_time == 0 {
            return Err(self.invalid(ProcessState::Ready));
        }
        self.transition(ProcessState::Running, ProcessState::Ready)?;
        self.last_ready_time = Some(now);
        self.ready_seq = ready_seq;
        Ok(())
    }

    fn transition(&mut self, from: ProcessState, to: ProcessState) -> Result<(), SimError> {
        if self.state != from {
            return Err(self.invalid(to));
        }
        self.state = to;
        Ok(())
    }

    fn invalid(&self, to: ProcessState) -> SimError {
        SimError::InvalidTransition {
            id: self.id,
            from: self.state,
            to,
        }
    }
}
