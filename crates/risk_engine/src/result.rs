//! Outcome of a single scenario.

use std::collections::BTreeMap;

use risk_models::instruments::PositionId;

/// One simulated market state and the portfolio's response to it.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioResult {
    /// Scenario index within its run
    pub index: usize,
    /// Return per underlying (fraction)
    pub returns: BTreeMap<String, f64>,
    /// IV change per underlying (vol points, clamped)
    pub iv_changes: BTreeMap<String, f64>,
    /// Whether any underlying jumped
    pub had_jump: bool,
    /// Dollar P&L
    pub total_pnl: f64,
    /// P&L as a fraction of NAV (0 when NAV ≤ 0)
    pub total_pnl_pct: f64,
    /// Dollar P&L per position identity
    pub position_pnls: BTreeMap<PositionId, f64>,
    /// Position with the largest positive P&L, if any gained
    pub top_contributor: Option<PositionId>,
    /// Position with the largest negative P&L, if any lost
    pub top_detractor: Option<PositionId>,
}

impl ScenarioResult {
    /// Largest-gain and largest-loss positions.
    ///
    /// Only strictly positive (negative) P&L qualifies; ties go to the
    /// position that sorts first.
    pub fn extremes(
        position_pnls: &BTreeMap<PositionId, f64>,
    ) -> (Option<PositionId>, Option<PositionId>) {
        let mut best: Option<(&PositionId, f64)> = None;
        let mut worst: Option<(&PositionId, f64)> = None;
        for (id, &pnl) in position_pnls {
            if pnl > 0.0 && best.map_or(true, |(_, b)| pnl > b) {
                best = Some((id, pnl));
            }
            if pnl < 0.0 && worst.map_or(true, |(_, w)| pnl < w) {
                worst = Some((id, pnl));
            }
        }
        (best.map(|(id, _)| id.clone()), worst.map(|(id, _)| id.clone()))
    }
}
