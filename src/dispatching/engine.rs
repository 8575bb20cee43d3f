//! Rule engine for multi-criteria dispatching.
//!
//! Applies dispatching rules in sequence: the next rule is consulted only
//! when every earlier rule ties, and the lowest process ID settles whatever
//! is left.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchContext, DispatchingRule, RuleScore};
use crate::models::Process;

/// A composable rule engine for process prioritization.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{rules, DispatchContext, RuleEngine};
/// use u_cpusched::models::{Process, ProcessSpec};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::ShortestService)
///     .with_rule(rules::ArrivalTime);
///
/// let a = Process::from_spec(&ProcessSpec::new(1, 0, 5));
/// let b = Process::from_spec(&ProcessSpec::new(2, 1, 3));
/// let best = engine.select_best(&[&a, &b], &DispatchContext::at_time(1));
/// assert_eq!(best, Some(1));
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule. Earlier rules take precedence.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the configured rules, in precedence order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns the index of the highest-priority candidate.
    pub fn select_best(&self, candidates: &[&Process], context: &DispatchContext) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| self.compare(a, b, context))
            .map(|(idx, _)| idx)
    }

    /// Evaluates a single process and returns scores from each rule.
    pub fn evaluate(&self, process: &Process, context: &DispatchContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(process, context))
            .collect()
    }

    /// Orders two processes; `Less` means `a` runs first.
    ///
    /// Scores compare exactly. When every rule ties, the lower ID wins.
    pub fn compare(&self, a: &Process, b: &Process, context: &DispatchContext) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a, context).cmp(&rule.evaluate(b, context)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        a.id.cmp(&b.id)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::models::ProcessSpec;

    fn make_process(id: u32, arrival: i64, service: i64) -> Process {
        Process::from_spec(&ProcessSpec::new(id, arrival, service))
    }

    #[test]
    fn test_single_rule() {
        let procs = [make_process(1, 0, 5), make_process(2, 0, 1), make_process(3, 0, 3)];
        let refs: Vec<&Process> = procs.iter().collect();
        let engine = RuleEngine::new().with_rule(rules::ShortestService);
        assert_eq!(engine.select_best(&refs, &DispatchContext::at_time(0)), Some(1));
    }

    #[test]
    fn test_sequential_with_tie_breaker() {
        let procs = [make_process(1, 4, 3), make_process(2, 2, 3), make_process(3, 0, 9)];
        let refs: Vec<&Process> = procs.iter().collect();
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestService)
            .with_rule(rules::ArrivalTime);
        // SPN ties between 1 and 2 → earlier arrival (2) wins
        assert_eq!(engine.select_best(&refs, &DispatchContext::at_time(5)), Some(1));
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let procs = [make_process(5, 0, 2), make_process(3, 0, 2)];
        let refs: Vec<&Process> = procs.iter().collect();
        let engine = RuleEngine::new().with_rule(rules::ArrivalTime);
        assert_eq!(engine.select_best(&refs, &DispatchContext::at_time(0)), Some(1));
    }

    #[test]
    fn test_empty_candidates() {
        let engine = RuleEngine::new().with_rule(rules::ShortestService);
        assert!(engine.select_best(&[], &DispatchContext::at_time(0)).is_none());
    }

    #[test]
    fn test_evaluate_scores() {
        let p = make_process(1, 2, 4);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestService)
            .with_rule(rules::ArrivalTime);
        let scores = engine.evaluate(&p, &DispatchContext::at_time(0));
        assert_eq!(scores, vec![RuleScore::whole(4), RuleScore::whole(2)]);
    }

    #[test]
    fn test_large_arrivals_compare_exactly() {
        let base = 1_i64 << 55;
        let procs = [make_process(1, base + 1, 2), make_process(2, base, 2)];
        let refs: Vec<&Process> = procs.iter().collect();
        let engine = RuleEngine::new().with_rule(rules::ArrivalTime);
        assert_eq!(engine.select_best(&refs, &DispatchContext::at_time(base + 1)), Some(1));
    }

    #[test]
    fn test_debug_lists_rules() {
        let engine = RuleEngine::new()
            .with_rule(rules::ResponseRatio)
            .with_rule(rules::ArrivalTime);
        assert_eq!(engine.rule_names(), vec!["HRRN", "ARRIVAL"]);
        assert!(format!("{engine:?}").contains("HRRN"));
    }
}
