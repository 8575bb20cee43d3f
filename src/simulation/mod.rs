//! Event-driven CPU scheduling simulation.
//!
//! The engine runs in logical time on a single CPU: it pops timestamped
//! events, applies them to the process arena, and asks the dispatch policy
//! for the next process whenever the CPU goes idle. Identical inputs always
//! produce identical results.
//!
//! # Reference
//! Banks et al. (2010), "Discrete-Event System Simulation", Ch. 3

mod engine;
mod event;

pub use engine::SimulationEngine;
pub use event::{Event, EventKind, EventQueue};
