//! Regime-conditioned scenario generation.
//!
//! For every scenario and every distinct underlying (in sorted order) the
//! generator draws either a jump or a correlated (return, IV change) pair,
//! clamps the IV change so the resulting volatility stays in
//! [[`MIN_SCENARIO_IV`], [`MAX_SCENARIO_IV`]], and revalues the portfolio
//! with [`Portfolio::estimate_pnl`].
//!
//! # Draw order
//!
//! Per underlying: one uniform (jump test), then either two normals for the
//! jump (return noise, IV noise) or two normals for the diffusion (`z1`,
//! `z2`). Each scenario owns an RNG derived from `(seed, index)`, so output
//! does not depend on thread count.

use std::collections::BTreeMap;
use std::time::Instant;

use risk_models::portfolio::Portfolio;
use tracing::{debug, info, info_span, trace};

use crate::config::{IvAnchor, SimulationConfig, FALLBACK_IV, MAX_SCENARIO_IV, MIN_SCENARIO_IV};
use crate::error::ConfigError;
use crate::presets::{RegimeParameters, ScenarioAssumptions};
use crate::result::ScenarioResult;
use crate::rng::ScenarioRng;

/// Standard deviation of the return noise around the mean jump size.
pub const JUMP_RETURN_STD: f64 = 0.05;

/// Standard deviation of the IV spike noise (vol points).
pub const JUMP_IV_STD: f64 = 2.0;

/// Return and IV move drawn for one underlying.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnderlyingDraw {
    /// Return (fraction)
    pub ret: f64,
    /// IV change (vol points), clamped
    pub iv_change_pts: f64,
    /// Whether the draw was a jump
    pub jumped: bool,
}

/// Draws one underlying's move.
///
/// `current_iv` must lie within [[`MIN_SCENARIO_IV`], [`MAX_SCENARIO_IV`]].
pub fn draw_underlying(
    rng: &mut ScenarioRng,
    params: &RegimeParameters,
    horizon_years: f64,
    current_iv: f64,
) -> UnderlyingDraw {
    let jumped = rng.gen_uniform() < params.jump_probability;

    let (ret, raw_iv) = if jumped {
        let ret = rng.gen_normal_with(params.jump_size_mean, JUMP_RETURN_STD);
        let iv = rng.gen_normal_with(params.jump_iv_spike, JUMP_IV_STD);
        (ret, iv)
    } else {
        let t = horizon_years;
        let sqrt_t = t.sqrt();
        let (z1, z2) = rng.gen_correlated_pair(params.spot_vol_correlation);
        let ret = params.equity_drift * t + params.equity_vol * sqrt_t * z1;
        let drift = params.iv_mean_reversion_speed * (params.iv_long_run_mean - current_iv) * t;
        let iv = (drift + params.iv_vol_of_vol * sqrt_t * z2) * 100.0;
        (ret, iv)
    };

    let lo = (MIN_SCENARIO_IV - current_iv) * 100.0;
    let hi = (MAX_SCENARIO_IV - current_iv) * 100.0;
    UnderlyingDraw {
        ret,
        iv_change_pts: raw_iv.clamp(lo, hi),
        jumped,
    }
}

/// Monte Carlo scenario generator over a fixed portfolio.
///
/// # Examples
///
/// ```
/// use risk_core::types::Date;
/// use risk_engine::{MarketRegime, ScenarioAssumptions, ScenarioGenerator, SimulationConfig};
/// use risk_models::demo::tail_hedge_book;
///
/// let book = tail_hedge_book(Date::from_ymd(2024, 12, 21).unwrap()).unwrap();
/// let assumptions = ScenarioAssumptions::for_regime(MarketRegime::RiskOff, 6);
/// let config = SimulationConfig::builder().n_scenarios(200).build().unwrap();
///
/// let results = ScenarioGenerator::new(&book, &assumptions, &config)
///     .unwrap()
///     .generate();
/// assert_eq!(results.len(), 200);
/// assert_eq!(results[0].returns.len(), 3);
/// ```
#[derive(Debug)]
pub struct ScenarioGenerator<'a> {
    portfolio: &'a Portfolio,
    assumptions: &'a ScenarioAssumptions,
    config: &'a SimulationConfig,
    anchors: Vec<(String, f64)>,
    nav: f64,
}

impl<'a> ScenarioGenerator<'a> {
    /// Prepares a run.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidHorizon` for a zero-month horizon
    /// - any error from [`SimulationConfig::validate`]
    pub fn new(
        portfolio: &'a Portfolio,
        assumptions: &'a ScenarioAssumptions,
        config: &'a SimulationConfig,
    ) -> Result<Self, ConfigError> {
        if assumptions.horizon_months() == 0 {
            return Err(ConfigError::InvalidHorizon(0));
        }
        config.validate()?;

        let anchors = portfolio
            .underlyings()
            .into_iter()
            .map(|underlying| {
                let iv = match config.iv_anchor() {
                    IvAnchor::Fixed(v) => v,
                    IvAnchor::EntryIv => portfolio
                        .underlying_entry_iv(&underlying)
                        .filter(|v| v.is_finite())
                        .unwrap_or(FALLBACK_IV)
                        .clamp(MIN_SCENARIO_IV, MAX_SCENARIO_IV),
                };
                (underlying, iv)
            })
            .collect();

        Ok(Self {
            portfolio,
            assumptions,
            config,
            anchors,
            nav: portfolio.nav(),
        })
    }

    /// Anchor IV used for `underlying`, if the portfolio holds it.
    pub fn current_iv(&self, underlying: &str) -> Option<f64> {
        self.anchors
            .iter()
            .find(|(u, _)| u == underlying)
            .map(|(_, iv)| *iv)
    }

    /// Runs every scenario, returning results in index order.
    pub fn generate(&self) -> Vec<ScenarioResult> {
        let n = self.config.n_scenarios();
        let span = info_span!("scenario_run", regime = %self.assumptions.label(), n_scenarios = n);
        let _entered = span.enter();

        let started = Instant::now();
        let results = self.config.parallel().map_indices(n, |i| self.simulate(i));

        for result in results.iter().take(self.config.trace_scenarios()) {
            debug!(
                index = result.index,
                returns = ?result.returns,
                iv_changes = ?result.iv_changes,
                had_jump = result.had_jump,
                total_pnl = result.total_pnl,
                total_pnl_pct = result.total_pnl_pct,
                "scenario"
            );
        }

        let jumps = results.iter().filter(|r| r.had_jump).count();
        let mean_pnl_pct = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.total_pnl_pct).sum::<f64>() / results.len() as f64
        };
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            scenarios_with_jumps = jumps,
            mean_pnl_pct,
            "scenario run complete"
        );

        results
    }

    /// Simulates scenario `index`.
    pub fn simulate(&self, index: usize) -> ScenarioResult {
        let mut rng = ScenarioRng::for_scenario(self.config.seed(), index);
        let params = self.assumptions.parameters();
        let t = self.assumptions.horizon_years();

        let mut returns = BTreeMap::new();
        let mut iv_changes = BTreeMap::new();
        let mut had_jump = false;

        for (underlying, current_iv) in &self.anchors {
            let draw = draw_underlying(&mut rng, params, t, *current_iv);
            trace!(
                index,
                underlying = %underlying,
                ret = draw.ret,
                iv_change_pts = draw.iv_change_pts,
                jumped = draw.jumped,
                "draw"
            );
            had_jump |= draw.jumped;
            returns.insert(underlying.clone(), draw.ret);
            iv_changes.insert(underlying.clone(), draw.iv_change_pts);
        }

        let pnl = self
            .portfolio
            .estimate_pnl(&returns, &iv_changes, self.assumptions.elapsed_days());
        let (top_contributor, top_detractor) = ScenarioResult::extremes(&pnl.by_position);
        let total_pnl_pct = if self.nav > 0.0 { pnl.total / self.nav } else { 0.0 };

        ScenarioResult {
            index,
            returns,
            iv_changes,
            had_jump,
            total_pnl: pnl.total,
            total_pnl_pct,
            position_pnls: pnl.by_position,
            top_contributor,
            top_detractor,
        }
    }
}
