//! Dispatch context for rule evaluation.

use crate::models::Time;

/// Runtime state passed to dispatching rules.
///
/// Rules that depend on elapsed waiting time (response ratio) read the
/// clock from here; the rest only look at the process itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    /// Current simulated time.
    pub current_time: Time,
}

impl DispatchContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: Time) -> Self {
        Self { current_time }
    }
}
