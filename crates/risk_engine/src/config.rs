//! Simulation configuration.
//!
//! [`SimulationConfig`] is immutable once built; construct it with
//! [`SimulationConfig::builder`].

use crate::error::ConfigError;
use crate::parallel::ParallelConfig;

/// Maximum number of scenarios allowed per run.
pub const MAX_SCENARIOS: usize = 10_000_000;

/// Seed used when none is supplied, so runs are reproducible by default.
pub const DEFAULT_SEED: u64 = 42;

/// Number of leading scenarios logged at `debug` level by default.
pub const DEFAULT_TRACE_SCENARIOS: usize = 3;

/// Lowest implied volatility a scenario may reach.
pub const MIN_SCENARIO_IV: f64 = 0.05;

/// Highest implied volatility a scenario may reach.
pub const MAX_SCENARIO_IV: f64 = 1.50;

/// IV level used when an underlying carries no options.
pub const FALLBACK_IV: f64 = 0.20;

/// Current implied volatility that IV draws mean-revert from and clamp
/// around.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum IvAnchor {
    /// Mean entry IV of the options on each underlying; [`FALLBACK_IV`] for
    /// underlyings without options.
    #[default]
    EntryIv,
    /// Same level for every underlying.
    Fixed(f64),
}

impl IvAnchor {
    /// Checks a fixed anchor lies within [[`MIN_SCENARIO_IV`], [`MAX_SCENARIO_IV`]].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::EntryIv => Ok(()),
            Self::Fixed(v) if (MIN_SCENARIO_IV..=MAX_SCENARIO_IV).contains(&v) => Ok(()),
            Self::Fixed(v) => Err(ConfigError::InvalidIvAnchor(v)),
        }
    }
}

/// Monte Carlo scenario run configuration.
///
/// # Examples
///
/// ```rust
/// use risk_engine::{IvAnchor, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .n_scenarios(10_000)
///     .seed(7)
///     .iv_anchor(IvAnchor::Fixed(0.20))
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_scenarios(), 10_000);
/// assert_eq!(config.seed(), 7);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    n_scenarios: usize,
    seed: u64,
    iv_anchor: IvAnchor,
    parallel: ParallelConfig,
    trace_scenarios: usize,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of scenarios.
    #[inline]
    pub fn n_scenarios(&self) -> usize {
        self.n_scenarios
    }

    /// Base seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// IV anchor.
    #[inline]
    pub fn iv_anchor(&self) -> IvAnchor {
        self.iv_anchor
    }

    /// Parallel scheduling.
    #[inline]
    pub fn parallel(&self) -> ParallelConfig {
        self.parallel
    }

    /// Number of leading scenarios logged at `debug` level.
    #[inline]
    pub fn trace_scenarios(&self) -> usize {
        self.trace_scenarios
    }

    /// Copy of this configuration with another scenario count and seed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidScenarioCount` if `n_scenarios` is out of
    /// range.
    pub fn with_run(&self, n_scenarios: usize, seed: u64) -> Result<Self, ConfigError> {
        let config = Self {
            n_scenarios,
            seed,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_scenarios` is 0 or greater than 10,000,000
    /// - a fixed IV anchor is outside [0.05, 1.50]
    /// - `batch_size` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_scenarios == 0 || self.n_scenarios > MAX_SCENARIOS {
            return Err(ConfigError::InvalidScenarioCount(self.n_scenarios));
        }
        self.iv_anchor.validate()?;
        if self.parallel.batch_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "batch_size",
                value: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_scenarios: Option<usize>,
    seed: Option<u64>,
    iv_anchor: IvAnchor,
    parallel: Option<ParallelConfig>,
    trace_scenarios: Option<usize>,
}

impl SimulationConfigBuilder {
    /// Sets the number of scenarios, in [1, 10_000_000].
    #[inline]
    pub fn n_scenarios(mut self, n_scenarios: usize) -> Self {
        self.n_scenarios = Some(n_scenarios);
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the IV anchor.
    #[inline]
    pub fn iv_anchor(mut self, iv_anchor: IvAnchor) -> Self {
        self.iv_anchor = iv_anchor;
        self
    }

    /// Sets parallel scheduling.
    #[inline]
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Sets how many leading scenarios are logged at `debug` level.
    #[inline]
    pub fn trace_scenarios(mut self, n: usize) -> Self {
        self.trace_scenarios = Some(n);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_scenarios` is not set or any value is
    /// invalid.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let n_scenarios = self.n_scenarios.ok_or(ConfigError::InvalidParameter {
            name: "n_scenarios",
            value: "must be specified".to_string(),
        })?;

        let config = SimulationConfig {
            n_scenarios,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            iv_anchor: self.iv_anchor,
            parallel: self.parallel.unwrap_or_default(),
            trace_scenarios: self.trace_scenarios.unwrap_or(DEFAULT_TRACE_SCENARIOS),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SimulationConfig::builder().n_scenarios(1_000).build().unwrap();
        assert_eq!(config.seed(), DEFAULT_SEED);
        assert_eq!(config.iv_anchor(), IvAnchor::EntryIv);
        assert_eq!(config.parallel(), ParallelConfig::default());
        assert_eq!(config.trace_scenarios(), 3);
    }

    #[test]
    fn test_missing_scenario_count() {
        let err = SimulationConfig::builder().build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidParameter {
                name: "n_scenarios",
                value: "must be specified".to_string()
            }
        );
    }

    #[test]
    fn test_scenario_count_bounds() {
        assert_eq!(
            SimulationConfig::builder().n_scenarios(0).build().unwrap_err(),
            ConfigError::InvalidScenarioCount(0)
        );
        assert!(SimulationConfig::builder()
            .n_scenarios(MAX_SCENARIOS + 1)
            .build()
            .is_err());
        assert!(SimulationConfig::builder()
            .n_scenarios(MAX_SCENARIOS)
            .build()
            .is_ok());
    }

    #[test]
    fn test_fixed_anchor_bounds() {
        for bad in [0.0, 0.04, 1.51, f64::NAN] {
            let result = SimulationConfig::builder()
                .n_scenarios(10)
                .iv_anchor(IvAnchor::Fixed(bad))
                .build();
            assert!(matches!(result, Err(ConfigError::InvalidIvAnchor(_))), "{bad}");
        }
        assert!(IvAnchor::Fixed(0.05).validate().is_ok());
        assert!(IvAnchor::Fixed(1.5).validate().is_ok());
    }

    #[test]
    fn test_zero_batch_rejected() {
        let result = SimulationConfig::builder()
            .n_scenarios(10)
            .parallel(ParallelConfig {
                batch_size: 0,
                parallel_threshold: 0,
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "batch_size", .. })
        ));
    }

    #[test]
    fn test_with_run() {
        let base = SimulationConfig::builder().n_scenarios(10).seed(1).build().unwrap();
        let run = base.with_run(500, 9).unwrap();
        assert_eq!(run.n_scenarios(), 500);
        assert_eq!(run.seed(), 9);
        assert_eq!(run.iv_anchor(), base.iv_anchor());
        assert!(base.with_run(0, 9).is_err());
    }
}
