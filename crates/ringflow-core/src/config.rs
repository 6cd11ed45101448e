//! Simulation and scenario configuration.
//!
//! A scenario file (`ringflow.toml`) describes a batch of runs that share
//! load and interval bounds but differ in processor count:
//!
//! ```toml
//! seed = 42
//! processor_counts = [3, 5, 10, 50, 100, 250]
//! max_iter = 4294967295
//!
//! [loads]
//! min = 10
//! max = 1000
//!
//! [cycles]
//! min = 100
//! max = 1000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Iteration cap used when none is configured.
pub const DEFAULT_MAX_ITER: u64 = u32::MAX as u64;

/// Processor counts run by the default scenario.
pub const DEFAULT_PROCESSOR_COUNTS: [usize; 6] = [3, 5, 10, 50, 100, 250];

/// Inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: u64,
    pub max: u64,
}

impl Bounds {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Parameters of a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of processors on the ring.
    pub processors: usize,
    /// Bounds for the initial load of each processor.
    pub loads: Bounds,
    /// Bounds for the interval between two executions of a processor.
    pub cycles: Bounds,
    /// The run stops once the lowest pending execution cycle reaches this value.
    pub max_iter: u64,
}

impl SimulationConfig {
    pub fn new(processors: usize) -> Self {
        Self {
            processors,
            ..Self::default()
        }
    }

    pub fn with_loads(mut self, min: u64, max: u64) -> Self {
        self.loads = Bounds::new(min, max);
        self
    }

    pub fn with_cycles(mut self, min: u64, max: u64) -> Self {
        self.cycles = Bounds::new(min, max);
        self
    }

    pub fn with_max_iter(mut self, max_iter: u64) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Check the preconditions a run needs before any state is built.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.processors == 0 {
            return Err(ConfigError::NoProcessors);
        }
        if !self.loads.is_ordered() {
            return Err(ConfigError::InvertedLoadBounds {
                min: self.loads.min,
                max: self.loads.max,
            });
        }
        if !self.cycles.is_ordered() {
            return Err(ConfigError::InvertedCycleBounds {
                min: self.cycles.min,
                max: self.cycles.max,
            });
        }
        // The total load of the ring has to fit a u64.
        if self.loads.max.checked_mul(self.processors as u64).is_none() {
            return Err(ConfigError::LoadBoundTooLarge {
                max: self.loads.max,
                processors: self.processors,
            });
        }
        // With every interval zero the lowest cycle can never move.
        if self.cycles.max == 0 {
            return Err(ConfigError::ZeroCycleInterval);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            processors: DEFAULT_PROCESSOR_COUNTS[0],
            loads: default_load_bounds(),
            cycles: default_cycle_bounds(),
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

/// A batch of runs, one per processor count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Seed for the random source. A fresh seed is drawn when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_processor_counts")]
    pub processor_counts: Vec<usize>,
    #[serde(default = "default_max_iter")]
    pub max_iter: u64,
    #[serde(default = "default_load_bounds")]
    pub loads: Bounds,
    #[serde(default = "default_cycle_bounds")]
    pub cycles: Bounds,
}

impl ScenarioConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// One run configuration per processor count, in file order.
    pub fn cases(&self) -> Vec<SimulationConfig> {
        self.processor_counts
            .iter()
            .map(|&processors| SimulationConfig {
                processors,
                loads: self.loads,
                cycles: self.cycles,
                max_iter: self.max_iter,
            })
            .collect()
    }

    /// Validate every case up front so a bad entry fails before any run starts.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.processor_counts.is_empty() {
            return Err(ConfigError::NoCases);
        }
        self.cases().iter().try_for_each(SimulationConfig::validate)
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: None,
            processor_counts: default_processor_counts(),
            max_iter: default_max_iter(),
            loads: default_load_bounds(),
            cycles: default_cycle_bounds(),
        }
    }
}

fn default_processor_counts() -> Vec<usize> {
    DEFAULT_PROCESSOR_COUNTS.to_vec()
}

fn default_max_iter() -> u64 {
    DEFAULT_MAX_ITER
}

fn default_load_bounds() -> Bounds {
    Bounds::new(10, 1000)
}

fn default_cycle_bounds() -> Bounds {
    Bounds::new(100, 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert!(ScenarioConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_processors() {
        let err = SimulationConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NoProcessors));
    }

    #[test]
    fn rejects_inverted_load_bounds() {
        let err = SimulationConfig::new(3)
            .with_loads(50, 10)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedLoadBounds { min: 50, max: 10 }));
    }

    #[test]
    fn rejects_inverted_cycle_bounds() {
        let err = SimulationConfig::new(3)
            .with_cycles(9, 3)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvertedCycleBounds { min: 9, max: 3 }));
    }

    #[test]
    fn rejects_all_zero_intervals() {
        let err = SimulationConfig::new(3)
            .with_cycles(0, 0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCycleInterval));
    }

    #[test]
    fn rejects_load_bounds_whose_total_overflows() {
        let half = u64::MAX / 2;
        let err = SimulationConfig::new(3)
            .with_loads(half, half)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::LoadBoundTooLarge { processors: 3, .. }));

        // Two processors at u64::MAX / 2 still fit.
        assert!(SimulationConfig::new(2).with_loads(half, half).validate().is_ok());
    }

    #[test]
    fn accepts_equal_bounds() {
        let cfg = SimulationConfig::new(4).with_loads(7, 7).with_cycles(5, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_minimal_scenario_fills_defaults() {
        let cfg = ScenarioConfig::from_toml_str("seed = 7\n").unwrap();

        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.processor_counts, vec![3, 5, 10, 50, 100, 250]);
        assert_eq!(cfg.loads, Bounds::new(10, 1000));
        assert_eq!(cfg.cycles, Bounds::new(100, 1000));
        assert_eq!(cfg.max_iter, u64::from(u32::MAX));
    }

    #[test]
    fn parse_full_scenario() {
        let toml_str = r#"
processor_counts = [4, 8]
max_iter = 5000

[loads]
min = 1
max = 20

[cycles]
min = 2
max = 9
"#;
        let cfg = ScenarioConfig::from_toml_str(toml_str).unwrap();
        let cases = cfg.cases();

        assert_eq!(cfg.seed, None);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].processors, 8);
        assert_eq!(cases[1].loads, Bounds::new(1, 20));
        assert_eq!(cases[1].cycles, Bounds::new(2, 9));
        assert_eq!(cases[1].max_iter, 5000);
    }

    #[test]
    fn scenario_rejects_empty_case_list() {
        let cfg = ScenarioConfig {
            processor_counts: Vec::new(),
            ..ScenarioConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NoCases)));
    }

    #[test]
    fn scenario_reports_first_bad_case() {
        let cfg = ScenarioConfig {
            processor_counts: vec![3, 0, 5],
            ..ScenarioConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NoProcessors)));
    }

    #[test]
    fn malformed_scenario_is_a_parse_error() {
        let err = ScenarioConfig::from_toml_str("processor_counts = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn scenario_survives_toml_serialization() {
        let cfg = ScenarioConfig {
            seed: Some(99),
            ..ScenarioConfig::default()
        };
        let text = cfg.to_toml_string().unwrap();
        assert!(text.contains("seed = 99"));
        assert_eq!(ScenarioConfig::from_toml_str(&text).unwrap(), cfg);
    }
}
