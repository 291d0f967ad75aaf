//! Regime-weighted simulation.
//!
//! Runs each regime with a share of the scenario count proportional to its
//! weight, analyses every regime on its own, then analyses the pooled
//! results as one distribution.

use std::collections::BTreeMap;

use risk_models::portfolio::Portfolio;
use tracing::info;

use crate::analysis::{RiskAnalyzer, RiskSummary};
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::generator::ScenarioGenerator;
use crate::presets::{MarketRegime, RegimeAdjustments, ScenarioAssumptions};
use crate::rng::derive_seed;

/// Weights below this are skipped.
pub const MIN_REGIME_WEIGHT: f64 = 0.01;

/// Scenario floor per included regime.
pub const MIN_REGIME_SCENARIOS: usize = 100;

/// Result of one regime inside a blended run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegimeBreakdown {
    /// Caller-supplied weight
    pub weight: f64,
    /// Scenarios run for this regime
    pub n_scenarios: usize,
    /// Pooled index of this regime's first scenario; its scenarios occupy
    /// `first_index..first_index + n_scenarios` in the pooled run
    pub first_index: usize,
    /// Metrics over this regime's scenarios alone
    pub summary: RiskSummary,
}

/// Result of a regime-weighted run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlendedSummary {
    /// Scenarios run across every regime
    pub total_scenarios: usize,
    /// Weights as supplied
    pub weights: BTreeMap<MarketRegime, f64>,
    /// Metrics over the pooled scenarios; highlight indices are pooled
    /// indices (see [`BlendedSummary::regime_of`])
    pub pooled: RiskSummary,
    /// Per-regime results, for regimes with weight ≥ [`MIN_REGIME_WEIGHT`]
    pub regimes: BTreeMap<MarketRegime, RegimeBreakdown>,
}

impl BlendedSummary {
    /// Regime that produced pooled scenario `index`.
    pub fn regime_of(&self, index: usize) -> Option<MarketRegime> {
        self.regimes
            .iter()
            .find(|(_, b)| (b.first_index..b.first_index + b.n_scenarios).contains(&index))
            .map(|(&regime, _)| regime)
    }
}

/// Scenario count for a regime of weight `weight` out of `n_total`.
///
/// ```
/// use risk_engine::blend::regime_scenarios;
///
/// assert_eq!(regime_scenarios(10_000, 0.3), 3_000);
/// assert_eq!(regime_scenarios(1_000, 0.05), 100);
/// ```
pub fn regime_scenarios(n_total: usize, weight: f64) -> usize {
    ((n_total as f64 * weight).floor() as usize).max(MIN_REGIME_SCENARIOS)
}

fn validate_weights(weights: &BTreeMap<MarketRegime, f64>) -> Result<(), ConfigError> {
    if let Some((regime, w)) = weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
        return Err(ConfigError::InvalidWeights(format!(
            "weight for {regime} must be finite and non-negative, got {w}"
        )));
    }
    if !weights.values().any(|w| *w >= MIN_REGIME_WEIGHT) {
        return Err(ConfigError::InvalidWeights(format!(
            "no regime has weight >= {MIN_REGIME_WEIGHT}"
        )));
    }
    Ok(())
}

/// Runs a regime-weighted simulation.
///
/// `config.n_scenarios()` is the total count; each included regime gets
/// [`regime_scenarios`] of it and a seed derived from the base seed and the
/// regime. `adjustments` are applied to every regime when given.
///
/// # Errors
///
/// - `ConfigError::InvalidWeights` for negative or non-finite weights, or
///   when no weight reaches [`MIN_REGIME_WEIGHT`]
/// - `ConfigError::InvalidHorizon` for a zero-month horizon
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use risk_core::types::Date;
/// use risk_engine::{run_blended, MarketRegime, SimulationConfig};
/// use risk_models::demo::tail_hedge_book;
///
/// let book = tail_hedge_book(Date::from_ymd(2024, 12, 21).unwrap()).unwrap();
/// let weights = BTreeMap::from([(MarketRegime::RiskOff, 0.3), (MarketRegime::Neutral, 0.7)]);
/// let config = SimulationConfig::builder().n_scenarios(1_000).build().unwrap();
///
/// let blended = run_blended(&book, &weights, 6, &config, None).unwrap();
/// assert_eq!(blended.total_scenarios, 1_000);
/// assert_eq!(blended.regimes[&MarketRegime::RiskOff].n_scenarios, 300);
/// ```
pub fn run_blended(
    portfolio: &Portfolio,
    weights: &BTreeMap<MarketRegime, f64>,
    horizon_months: u32,
    config: &SimulationConfig,
    adjustments: Option<&RegimeAdjustments>,
) -> Result<BlendedSummary, ConfigError> {
    validate_weights(weights)?;
    if horizon_months == 0 {
        return Err(ConfigError::InvalidHorizon(0));
    }

    let analyzer = RiskAnalyzer::new();
    let mut pooled = Vec::new();
    let mut regimes = BTreeMap::new();

    for (&regime, &weight) in weights {
        if weight < MIN_REGIME_WEIGHT {
            continue;
        }

        let base = ScenarioAssumptions::for_regime(regime, horizon_months);
        let assumptions = match adjustments {
            Some(adj) => base.with_adjustments(adj, format!("{}_adjusted", regime.name())),
            None => base,
        };
        let n = regime_scenarios(config.n_scenarios(), weight);
        let run_config = config.with_run(n, derive_seed(config.seed(), regime as u64))?;

        let mut results =
            ScenarioGenerator::new(portfolio, &assumptions, &run_config)?.generate();
        info!(regime = %regime, weight, n_scenarios = n, "regime run complete");

        regimes.insert(
            regime,
            RegimeBreakdown {
                weight,
                n_scenarios: n,
                first_index: pooled.len(),
                summary: analyzer.analyze(&results),
            },
        );
        let offset = pooled.len();
        for result in &mut results {
            result.index += offset;
        }
        pooled.extend(results);
    }

    Ok(BlendedSummary {
        total_scenarios: pooled.len(),
        weights: weights.clone(),
        pooled: analyzer.analyze(&pooled),
        regimes,
    })
}
