//! Distributional statistics, tail risk and attribution over scenario results.
//!
//! All P&L figures are fractions of NAV unless the field name says
//! otherwise. Quantiles interpolate linearly between order statistics.

use std::collections::BTreeMap;

use risk_models::instruments::PositionId;
use tracing::warn;

use crate::result::ScenarioResult;

/// Number of best and worst scenarios reported.
pub const HIGHLIGHT_COUNT: usize = 3;

/// Quantile of an ascending slice with linear interpolation.
///
/// `p` is clamped to [0, 1]. Returns NaN for an empty slice.
///
/// ```
/// use risk_engine::analysis::quantile_sorted;
///
/// let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(quantile_sorted(&xs, 0.5), 3.0);
/// assert_eq!(quantile_sorted(&xs, 0.25), 2.0);
/// ```
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    match n {
        0 => f64::NAN,
        1 => sorted[0],
        _ => {
            let idx = p.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = idx.floor() as usize;
            let hi = (idx.ceil() as usize).min(n - 1);
            let w = idx - lo as f64;
            sorted[lo] * (1.0 - w) + sorted[hi] * w
        }
    }
}

/// Value-at-Risk: the `(1 − confidence)` quantile of `values`.
pub fn value_at_risk(values: &[f64], confidence: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile_sorted(&sorted, 1.0 - confidence)
}

/// One of the best or worst scenarios.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioHighlight {
    /// Scenario index
    pub index: usize,
    /// P&L as a fraction of NAV
    pub pnl_pct: f64,
    /// Return per underlying
    pub returns: BTreeMap<String, f64>,
    /// IV change per underlying (vol points)
    pub iv_changes: BTreeMap<String, f64>,
    /// Whether any underlying jumped
    pub had_jump: bool,
    /// Largest gainer
    pub top_contributor: Option<PositionId>,
    /// Largest loser
    pub top_detractor: Option<PositionId>,
}

impl From<&ScenarioResult> for ScenarioHighlight {
    fn from(r: &ScenarioResult) -> Self {
        Self {
            index: r.index,
            pnl_pct: r.total_pnl_pct,
            returns: r.returns.clone(),
            iv_changes: r.iv_changes.clone(),
            had_jump: r.had_jump,
            top_contributor: r.top_contributor.clone(),
            top_detractor: r.top_detractor.clone(),
        }
    }
}

/// A position's share of the tail loss.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributionEntry {
    /// Position identity
    pub position: PositionId,
    /// Summed dollar P&L across tail scenarios
    pub pnl: f64,
    /// Percentage of the summed tail P&L (0 when that total is 0)
    pub pct: f64,
}

/// Risk metrics over a set of scenario results.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskSummary {
    /// Number of scenarios analysed
    pub n_scenarios: usize,
    /// Mean P&L
    pub mean_pnl_pct: f64,
    /// Median P&L
    pub median_pnl_pct: f64,
    /// Population standard deviation
    pub std_pnl_pct: f64,
    /// Population skewness (0 when std is 0)
    pub skewness: f64,
    /// 5th percentile
    pub var_95_pct: f64,
    /// 1st percentile
    pub var_99_pct: f64,
    /// Mean of outcomes at or below `var_95_pct`
    pub cvar_95_pct: f64,
    /// Best outcome
    pub max_gain_pct: f64,
    /// Worst outcome
    pub max_loss_pct: f64,
    /// P(pnl > 0)
    pub prob_positive: f64,
    /// P(pnl < −10%)
    pub prob_loss_gt_10pct: f64,
    /// P(pnl < −20%)
    pub prob_loss_gt_20pct: f64,
    /// Best scenarios, best first
    pub top_3_winners: Vec<ScenarioHighlight>,
    /// Worst scenarios, worst first
    pub top_3_losers: Vec<ScenarioHighlight>,
    /// Tail attribution, most negative first
    pub cvar_attribution: Vec<AttributionEntry>,
}

/// Stateless analyzer over scenario results.
///
/// # Examples
///
/// ```
/// use risk_engine::{RiskAnalyzer, ScenarioResult};
///
/// let results: Vec<ScenarioResult> = [-0.3, -0.1, 0.0, 0.1, 0.2]
///     .iter()
///     .enumerate()
///     .map(|(index, &p)| ScenarioResult { index, total_pnl_pct: p, ..Default::default() })
///     .collect();
///
/// let summary = RiskAnalyzer::new().analyze(&results);
/// assert_eq!(summary.n_scenarios, 5);
/// assert_eq!(summary.median_pnl_pct, 0.0);
/// assert_eq!(summary.max_loss_pct, -0.3);
/// assert_eq!(summary.prob_positive, 0.4);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RiskAnalyzer;

impl RiskAnalyzer {
    /// Creates an analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Computes every metric over `results`.
    ///
    /// An empty slice yields an all-zero summary.
    pub fn analyze(&self, results: &[ScenarioResult]) -> RiskSummary {
        if results.is_empty() {
            warn!("risk analysis requested for an empty result set");
            return RiskSummary::default();
        }

        let n = results.len() as f64;
        let pnls: Vec<f64> = results.iter().map(|r| r.total_pnl_pct).collect();
        let mut sorted = pnls.clone();
        sorted.sort_by(f64::total_cmp);

        let mean = pnls.iter().sum::<f64>() / n;
        let variance = pnls.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let skewness = if std > 0.0 {
            pnls.iter().map(|x| ((x - mean) / std).powi(3)).sum::<f64>() / n
        } else {
            0.0
        };

        let var_95 = quantile_sorted(&sorted, 0.05);
        let var_99 = quantile_sorted(&sorted, 0.01);
        let tail: Vec<&ScenarioResult> = results
            .iter()
            .filter(|r| r.total_pnl_pct <= var_95)
            .collect();
        let cvar_95 = if tail.is_empty() {
            var_95
        } else {
            tail.iter().map(|r| r.total_pnl_pct).sum::<f64>() / tail.len() as f64
        };

        let fraction = |pred: &dyn Fn(f64) -> bool| pnls.iter().filter(|&&x| pred(x)).count() as f64 / n;

        let (top_3_winners, top_3_losers) = highlights(results);

        RiskSummary {
            n_scenarios: results.len(),
            mean_pnl_pct: mean,
            median_pnl_pct: quantile_sorted(&sorted, 0.5),
            std_pnl_pct: std,
            skewness,
            var_95_pct: var_95,
            var_99_pct: var_99,
            cvar_95_pct: cvar_95,
            max_gain_pct: sorted[sorted.len() - 1],
            max_loss_pct: sorted[0],
            prob_positive: fraction(&|x| x > 0.0),
            prob_loss_gt_10pct: fraction(&|x| x < -0.10),
            prob_loss_gt_20pct: fraction(&|x| x < -0.20),
            top_3_winners,
            top_3_losers,
            cvar_attribution: attribution(&tail),
        }
    }
}

/// Best and worst scenarios. The sort is stable, so equal outcomes keep
/// index order among losers and reverse index order among winners.
fn highlights(results: &[ScenarioResult]) -> (Vec<ScenarioHighlight>, Vec<ScenarioHighlight>) {
    let mut by_pnl: Vec<&ScenarioResult> = results.iter().collect();
    by_pnl.sort_by(|a, b| a.total_pnl_pct.total_cmp(&b.total_pnl_pct));

    let losers = by_pnl
        .iter()
        .take(HIGHLIGHT_COUNT)
        .map(|r| ScenarioHighlight::from(*r))
        .collect();
    let winners = by_pnl
        .iter()
        .rev()
        .take(HIGHLIGHT_COUNT)
        .map(|r| ScenarioHighlight::from(*r))
        .collect();
    (winners, losers)
}

/// Per-position share of the summed tail P&L, most negative first.
fn attribution(tail: &[&ScenarioResult]) -> Vec<AttributionEntry> {
    let mut sums: BTreeMap<&PositionId, f64> = BTreeMap::new();
    for result in tail {
        for (id, pnl) in &result.position_pnls {
            *sums.entry(id).or_insert(0.0) += pnl;
        }
    }

    let total: f64 = sums.values().sum();
    let mut entries: Vec<AttributionEntry> = sums
        .into_iter()
        .map(|(id, pnl)| AttributionEntry {
            position: id.clone(),
            pnl,
            pct: if total != 0.0 { pnl / total * 100.0 } else { 0.0 },
        })
        .collect();
    entries.sort_by(|a, b| a.pnl.total_cmp(&b.pnl));
    entries
}
