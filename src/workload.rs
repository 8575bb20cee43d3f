//! Seeded random workload generation.
//!
//! Produces reproducible process lists for experiments and tests. Each
//! tick of the horizon independently spawns a process with probability
//! `arrival_probability`; service times are uniform over
//! `[min_service, max_service]`.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{ProcessId, ProcessSpec, Time};

/// Workload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of ticks during which processes may arrive.
    pub horizon: Time,
    /// Per-tick arrival probability (0.0..=1.0).
    pub arrival_probability: f64,
    /// Shortest service time (>= 1).
    pub min_service: Time,
    /// Longest service time (>= `min_service`).
    pub max_service: Time,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            horizon: 40,
            arrival_probability: 0.4,
            min_service: 1,
            max_service: 8,
        }
    }
}

impl WorkloadConfig {
    /// Sets the arrival horizon.
    pub fn with_horizon(mut self, horizon: Time) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the per-tick arrival probability.
    pub fn with_arrival_probability(mut self, p: f64) -> Self {
        self.arrival_probability = p;
        self
    }

    /// Sets the service time range.
    pub fn with_service_range(mut self, min: Time, max: Time) -> Self {
        self.min_service = min;
        self.max_service = max;
        self
    }
}

/// Generates a process list. Same config and seed give the same list.
///
/// Out-of-range parameters are clamped: probability into `[0, 1]`,
/// `min_service` to at least 1, `max_service` to at least `min_service`.
/// IDs are assigned from 1 in arrival order.
pub fn generate(config: &WorkloadConfig, seed: u64) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let p = config.arrival_probability.clamp(0.0, 1.0);
    let min_service = config.min_service.max(1);
    let max_service = config.max_service.max(min_service);

    let mut specs = Vec::new();
    for t in 0..config.horizon.max(0) {
        if rng.random::<f64>() < p {
            let service = rng.random_range(min_service..=max_service);
            specs.push(ProcessSpec::new(specs.len() as ProcessId + 1, t, service));
        }
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_processes;

    #[test]
    fn test_reproducible() {
        let config = WorkloadConfig::default();
        assert_eq!(generate(&config, 7), generate(&config, 7));
    }

    #[test]
    fn test_respects_bounds() {
        let config = WorkloadConfig::default()
            .with_horizon(200)
            .with_service_range(2, 5);
        let specs = generate(&config, 3);
        assert!(!specs.is_empty());
        assert!(validate_processes(&specs).is_ok());
        for spec in &specs {
            assert!((2..=5).contains(&spec.service_time));
            assert!((0..200).contains(&spec.arrival_time));
        }
        assert!(specs.windows(2).all(|w| w[0].arrival_time < w[1].arrival_time));
    }

    #[test]
    fn test_probability_extremes() {
        let every_tick = WorkloadConfig::default()
            .with_horizon(10)
            .with_arrival_probability(1.0);
        assert_eq!(generate(&every_tick, 0).len(), 10);

        let never = WorkloadConfig::default().with_arrival_probability(0.0);
        assert!(generate(&never, 0).is_empty());
    }

    #[test]
    fn test_clamps_bad_ranges() {
        let config = WorkloadConfig::default()
            .with_horizon(20)
            .with_arrival_probability(2.0)
            .with_service_range(0, -4);
        let specs = generate(&config, 1);
        assert_eq!(specs.len(), 20);
        assert!(specs.iter().all(|s| s.service_time == 1));
    }
}
