//! Error types for simulation configuration.

use thiserror::Error;

/// Invalid simulation configuration.
///
/// # Examples
/// ```
/// use risk_engine::ConfigError;
///
/// let err = ConfigError::InvalidScenarioCount(0);
/// assert_eq!(err.to_string(), "Invalid scenario count: 0 (must be 1..=10000000)");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Scenario count is zero or above the maximum.
    #[error("Invalid scenario count: {0} (must be 1..=10000000)")]
    InvalidScenarioCount(usize),

    /// Horizon of zero months.
    #[error("Invalid horizon: {0} months (must be at least 1)")]
    InvalidHorizon(u32),

    /// Fixed IV anchor outside the simulated volatility range.
    #[error("Invalid IV anchor: {0} (must be within [0.05, 1.50])")]
    InvalidIvAnchor(f64),

    /// Regime weights that cannot be used for a blended run.
    #[error("Invalid regime weights: {0}")]
    InvalidWeights(String),

    /// Other invalid parameter.
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the problem
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_display() {
        assert_eq!(
            ConfigError::InvalidHorizon(0).to_string(),
            "Invalid horizon: 0 months (must be at least 1)"
        );
    }

    #[test]
    fn test_iv_anchor_display() {
        assert_eq!(
            ConfigError::InvalidIvAnchor(2.0).to_string(),
            "Invalid IV anchor: 2 (must be within [0.05, 1.50])"
        );
    }

    #[test]
    fn test_parameter_display() {
        let err = ConfigError::InvalidParameter {
            name: "batch_size",
            value: "must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter batch_size: must be positive");
    }

    #[test]
    fn test_weights_display() {
        let err = ConfigError::InvalidWeights("no regime has weight >= 0.01".to_string());
        assert!(err.to_string().starts_with("Invalid regime weights:"));
    }
}
