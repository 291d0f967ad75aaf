//! Point-in-time exposure snapshot.

/// Calendar days in the theta carry window.
pub const THETA_CARRY_DAYS: f64 = 180.0;

/// Aggregate exposures of a portfolio at its last valuation.
///
/// Every `*_pct` field is a percentage of NAV and is 0 when NAV ≤ 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioSummary {
    /// Sum of position notionals plus cash
    pub nav: f64,
    /// Number of positions
    pub n_positions: usize,
    /// Number of option positions
    pub n_options: usize,
    /// Dollar delta per 1% underlying move, as % of NAV
    pub net_delta_pct: f64,
    /// Dollar P&L per 1% move in every underlying
    pub net_delta_usd_per_1pct: f64,
    /// Dollar P&L per vol point
    pub net_vega: f64,
    /// Dollar P&L per calendar day from decay
    pub net_theta_per_day: f64,
    /// Dollar gamma
    pub net_gamma: f64,
    /// Six months of theta as % of NAV
    pub theta_carry_pct_6m: f64,
}
