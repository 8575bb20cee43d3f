//! Dispatching rules, rule engine and dispatch policies.
//!
//! A [`DispatchPolicy`] decides which ready process gets the idle CPU and
//! for how long. Selection is delegated to a [`RuleEngine`] built from the
//! rules in [`rules`], so every algorithm shares the same deterministic
//! tie-breaking down to the process ID.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{rules, DispatchContext, RuleEngine};
//! use u_cpusched::models::{Process, ProcessSpec};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestService)
//!     .with_rule(rules::ArrivalTime);
//!
//! let long = Process::from_spec(&ProcessSpec::new(1, 0, 9));
//! let short = Process::from_spec(&ProcessSpec::new(2, 3, 2));
//! let context = DispatchContext::at_time(4);
//! assert_eq!(engine.select_best(&[&long, &short], &context), Some(1));
//! ```

mod context;
mod engine;
mod policy;
pub mod rules;

pub use context::DispatchContext;
pub use engine::RuleEngine;
pub use policy::DispatchPolicy;

use crate::models::Process;
use std::cmp::Ordering;
use std::fmt;

/// Score returned by a dispatching rule.
///
/// An exact rational `numerator / denominator` with a positive
/// denominator. Scores compare by cross-multiplication in `i128`, so two
/// response ratios that differ in the tenth decimal place still order
/// correctly. Both parts fit in 64 bits, so the products cannot overflow.
///
/// Lower scores = higher priority (dispatched first).
#[derive(Clone, Copy)]
pub struct RuleScore {
    numerator: i128,
    denominator: i128,
}

impl RuleScore {
    /// An integral score.
    pub fn whole(value: impl Into<i128>) -> Self {
        Self {
            numerator: value.into(),
            denominator: 1,
        }
    }

    /// The score `numerator / denominator`. `denominator` must be positive.
    pub fn ratio(numerator: impl Into<i128>, denominator: impl Into<i128>) -> Self {
        let denominator = denominator.into();
        debug_assert!(denominator > 0, "score denominator must be positive");
        Self {
            numerator: numerator.into(),
            denominator,
        }
    }
}

impl Ord for RuleScore {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numerator * other.denominator).cmp(&(other.numerator * self.denominator))
    }
}

impl PartialOrd for RuleScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RuleScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RuleScore {}

impl fmt::Debug for RuleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// A dispatching rule that evaluates process priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules that prefer larger values
/// (such as response ratio) return the negation.
pub trait DispatchingRule: Send + Sync + fmt::Debug {
    /// Rule name (e.g., "SPN", "HRRN").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a process given the current dispatch context.
    fn evaluate(&self, process: &Process, context: &DispatchContext) -> RuleScore;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_ordering_is_exact() {
        // 99999/100000 vs 100000/100001 differ by about 1e-10
        let a = RuleScore::ratio(99_999, 100_000);
        let b = RuleScore::ratio(100_000, 100_001);
        assert!(a < b);
        assert_eq!(RuleScore::ratio(2, 4), RuleScore::ratio(1, 2));
        assert!(RuleScore::ratio(-3, 2) < RuleScore::whole(-1));
    }

    #[test]
    fn test_whole_scores_beyond_f64_precision() {
        let big = 1_i64 << 60;
        assert!(RuleScore::whole(big) < RuleScore::whole(big + 1));
        assert!(RuleScore::whole(u64::MAX - 1) < RuleScore::whole(u64::MAX));
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", RuleScore::whole(7)), "7");
        assert_eq!(format!("{:?}", RuleScore::ratio(-3, 4)), "-3/4");
    }
}
