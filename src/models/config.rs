//! Scheduler configuration.
//!
//! Selects the dispatch algorithm and carries its parameters, plus optional
//! ceilings that stop a misbehaving run instead of letting it loop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Time;
use crate::error::ConfigError;

/// Dispatch algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come-First-Served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Round-Robin with a fixed quantum.
    #[serde(rename = "RR")]
    RoundRobin,
    /// Shortest-Process-Next.
    #[serde(rename = "SPN")]
    Spn,
    /// Highest-Response-Ratio-Next.
    #[serde(rename = "HRRN")]
    Hrrn,
}

impl Algorithm {
    /// Short name used in scheduler files and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::RoundRobin => "RR",
            Self::Spn => "SPN",
            Self::Hrrn => "HRRN",
        }
    }

    /// Whether a running process can lose the CPU before it finishes.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FCFS" => Ok(Self::Fcfs),
            "RR" => Ok(Self::RoundRobin),
            "SPN" => Ok(Self::Spn),
            "HRRN" => Ok(Self::Hrrn),
            _ => Err(ConfigError::UnsupportedAlgorithm(s.trim().to_string())),
        }
    }
}

/// Algorithm selection and parameters.
///
/// `quantum` is only read for RR and `alpha` only for HRRN; either may be
/// present for other algorithms and is then ignored.
///
/// # Example
/// ```
/// use u_cpusched::models::{Algorithm, SchedulerConfig};
///
/// let config = SchedulerConfig::round_robin(4);
/// assert_eq!(config.algorithm, Algorithm::RoundRobin);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Dispatch algorithm.
    pub algorithm: Algorithm,
    /// RR time slice. Required and positive for RR.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Time>,
    /// HRRN aging weight on service time. Required for HRRN; `1.0` is
    /// textbook HRRN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl SchedulerConfig {
    /// Creates a config for `algorithm` with no parameters.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            quantum: None,
            alpha: None,
        }
    }

    /// First-Come-First-Served.
    pub fn fcfs() -> Self {
        Self::new(Algorithm::Fcfs)
    }

    /// Round-Robin with the given quantum.
    pub fn round_robin(quantum: Time) -> Self {
        Self::new(Algorithm::RoundRobin).with_quantum(quantum)
    }

    /// Shortest-Process-Next.
    pub fn spn() -> Self {
        Self::new(Algorithm::Spn)
    }

    /// Highest-Response-Ratio-Next with the given aging weight.
    pub fn hrrn(alpha: f64) -> Self {
        Self::new(Algorithm::Hrrn).with_alpha(alpha)
    }

    /// Sets the RR quantum.
    pub fn with_quantum(mut self, quantum: Time) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the HRRN aging weight.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Checks that the parameters required by `algorithm` are present and sane.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.algorithm {
            Algorithm::RoundRobin => match self.quantum {
                None => Err(ConfigError::MissingQuantum),
                Some(q) if q <= 0 => Err(ConfigError::NonPositiveQuantum(q)),
                Some(_) => Ok(()),
            },
            Algorithm::Hrrn => match self.alpha {
                None => Err(ConfigError::MissingAlpha),
                Some(a) if !a.is_finite() || a < 0.0 => Err(ConfigError::InvalidAlpha(a)),
                Some(_) => Ok(()),
            },
            Algorithm::Fcfs | Algorithm::Spn => Ok(()),
        }
    }
}

/// Ceilings on a single run. Exceeding either aborts with a deadlock error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationLimits {
    /// Maximum number of events popped from the queue.
    #[serde(default)]
    pub max_events: Option<u64>,
    /// Maximum simulated clock value.
    #[serde(default)]
    pub max_time: Option<Time>,
}

impl SimulationLimits {
    /// No ceilings.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Sets the event ceiling.
    pub fn with_max_events(mut self, max_events: u64) -> Self {
        self.max_events = Some(max_events);
        self
    }

    /// Sets the simulated time ceiling.
    pub fn with_max_time(mut self, max_time: Time) -> Self {
        self.max_time = Some(max_time);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("FCFS".parse::<Algorithm>().unwrap(), Algorithm::Fcfs);
        assert_eq!(" rr ".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
        assert_eq!("spn".parse::<Algorithm>().unwrap(), Algorithm::Spn);
        assert_eq!("Hrrn".parse::<Algorithm>().unwrap(), Algorithm::Hrrn);
        assert_eq!(
            "SRT".parse::<Algorithm>(),
            Err(ConfigError::UnsupportedAlgorithm("SRT".into()))
        );
    }

    #[test]
    fn test_rr_requires_positive_quantum() {
        assert_eq!(
            SchedulerConfig::new(Algorithm::RoundRobin).validate(),
            Err(ConfigError::MissingQuantum)
        );
        assert_eq!(
            SchedulerConfig::round_robin(0).validate(),
            Err(ConfigError::NonPositiveQuantum(0))
        );
        assert_eq!(
            SchedulerConfig::round_robin(-3).validate(),
            Err(ConfigError::NonPositiveQuantum(-3))
        );
        assert!(SchedulerConfig::round_robin(1).validate().is_ok());
    }

    #[test]
    fn test_hrrn_requires_alpha() {
        assert_eq!(
            SchedulerConfig::new(Algorithm::Hrrn).validate(),
            Err(ConfigError::MissingAlpha)
        );
        assert!(matches!(
            SchedulerConfig::hrrn(f64::NAN).validate(),
            Err(ConfigError::InvalidAlpha(_))
        ));
        assert!(SchedulerConfig::hrrn(-0.5).validate().is_err());
        assert!(SchedulerConfig::hrrn(0.0).validate().is_ok());
        assert!(SchedulerConfig::hrrn(1.0).validate().is_ok());
    }

    #[test]
    fn test_unused_parameters_ignored() {
        let config = SchedulerConfig::fcfs().with_quantum(0).with_alpha(f64::NAN);
        assert!(config.validate().is_ok());
        assert!(SchedulerConfig::spn().validate().is_ok());
    }

    #[test]
    fn test_config_serde() {
        let config = SchedulerConfig::round_robin(3);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"algorithm":"RR","quantum":3}"#);

        let parsed: SchedulerConfig =
            serde_json::from_str(r#"{"algorithm":"HRRN","alpha":1.5}"#).unwrap();
        assert_eq!(parsed, SchedulerConfig::hrrn(1.5));

        assert!(serde_json::from_str::<SchedulerConfig>(r#"{"algorithm":"LOTTERY"}"#).is_err());
    }

    #[test]
    fn test_limits_builder() {
        let limits = SimulationLimits::unbounded()
            .with_max_events(100)
            .with_max_time(50);
        assert_eq!(limits.max_events, Some(100));
        assert_eq!(limits.max_time, Some(50));
        assert_eq!(SimulationLimits::default(), SimulationLimits::unbounded());
    }
}
