//! CPU scheduling domain models.
//!
//! Input descriptions, the mutable per-process simulation record, the
//! scheduler configuration, and the result types handed back to callers.
//!
//! # Lifecycle
//!
//! | Type | Created by | Mutated by |
//! |------|-----------|------------|
//! | `ProcessSpec` | caller / loader | never |
//! | `SchedulerConfig` | caller / loader | never |
//! | `Process` | engine, once per `ProcessSpec` | engine only, until `Finished` |
//! | `Schedule` | engine | engine, append-only |
//! | `ProcessResult` | statistics collector | never |

mod config;
mod process;
mod result;
mod schedule;

pub use config::{Algorithm, SchedulerConfig, SimulationLimits};
pub use process::{Process, ProcessId, ProcessSpec, ProcessState, Time};
pub use result::{MeanStatistics, ProcessResult};
pub use schedule::{RunSlice, Schedule, SliceOutcome};
