//! Portfolio aggregation.
//!
//! A [`Portfolio`] owns an ordered list of positions and a cash balance. NAV
//! and every exposure figure are recomputed on each call from the positions'
//! cached greeks, so a revaluation is reflected immediately.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use risk_models::instruments::Position;
//! use risk_models::portfolio::Portfolio;
//!
//! let portfolio = Portfolio::new(vec![Position::share("SPY", 100.0, 500.0).unwrap()], 0.0);
//! let returns = BTreeMap::from([("SPY".to_string(), 0.10)]);
//! let pnl = portfolio.estimate_pnl(&returns, &BTreeMap::new(), 30);
//! assert_eq!(pnl.total, 5_000.0);
//! ```

pub mod builder;
pub mod error;
pub mod summary;

pub use builder::PortfolioBuilder;
pub use error::PortfolioError;
pub use summary::{PortfolioSummary, THETA_CARRY_DAYS};

use std::collections::{BTreeMap, BTreeSet};

use risk_core::types::Date;
use tracing::debug;

use crate::instruments::{Position, PositionId, ValuationContext};

/// Market quote for one underlying.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnderlyingQuote {
    /// Underlying price
    pub price: f64,
    /// Implied volatility as a fraction
    pub implied_vol: f64,
}

impl UnderlyingQuote {
    /// Creates a quote.
    pub fn new(price: f64, implied_vol: f64) -> Self {
        Self { price, implied_vol }
    }
}

/// Result of a portfolio P&L estimate.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioPnl {
    /// Sum over all positions
    pub total: f64,
    /// P&L per position identity
    pub by_position: BTreeMap<PositionId, f64>,
}

/// Positions plus cash.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portfolio {
    positions: Vec<Position>,
    cash: f64,
}

impl Portfolio {
    /// Creates a portfolio without validation.
    ///
    /// Positions that share an identity are kept and their P&L accumulates
    /// into one entry. Use [`PortfolioBuilder`] to reject duplicates.
    pub fn new(positions: Vec<Position>, cash: f64) -> Self {
        Self { positions, cash }
    }

    /// Returns a builder.
    pub fn builder() -> PortfolioBuilder {
        PortfolioBuilder::new()
    }

    /// Positions in insertion order.
    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Cash balance.
    #[inline]
    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` when no positions are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Net asset value: position notionals plus cash.
    pub fn nav(&self) -> f64 {
        self.positions.iter().map(Position::notional).sum::<f64>() + self.cash
    }

    /// Distinct underlying symbols, sorted.
    pub fn underlyings(&self) -> BTreeSet<String> {
        self.positions
            .iter()
            .map(|p| p.underlying().to_string())
            .collect()
    }

    /// Mean entry IV of the options on `underlying`, or `None` if it has no
    /// option positions.
    pub fn underlying_entry_iv(&self, underlying: &str) -> Option<f64> {
        let ivs: Vec<f64> = self
            .positions
            .iter()
            .filter(|p| p.underlying() == underlying)
            .filter_map(|p| p.option_contract().map(|c| c.entry_iv()))
            .collect();
        if ivs.is_empty() {
            None
        } else {
            Some(ivs.iter().sum::<f64>() / ivs.len() as f64)
        }
    }

    /// Recomputes every position's greeks.
    ///
    /// Each option is valued against the quote for its underlying; an option
    /// whose underlying has no quote falls back to its own entry underlying
    /// price and entry IV.
    pub fn compute_greeks(
        &mut self,
        quotes: &BTreeMap<String, UnderlyingQuote>,
        as_of: Date,
        rate: f64,
    ) {
        for position in &mut self.positions {
            let ctx = match quotes.get(position.underlying()) {
                Some(quote) => ValuationContext::new(quote.price, quote.implied_vol, as_of),
                None => {
                    let iv = position.option_contract().map_or(0.0, |c| c.entry_iv());
                    if position.is_option() {
                        debug!(position = %position.id(), "no quote, valuing at entry state");
                    }
                    ValuationContext::new(position.entry_underlying_price(), iv, as_of)
                }
            };
            position.compute_greeks(&ctx.with_rate(rate));
        }
    }

    /// Bounded P&L of every position for per-underlying returns (fractions)
    /// and IV changes (vol points).
    ///
    /// An underlying missing from either map moves by zero.
    pub fn estimate_pnl(
        &self,
        returns: &BTreeMap<String, f64>,
        iv_changes: &BTreeMap<String, f64>,
        elapsed_days: u32,
    ) -> PortfolioPnl {
        let mut pnl = PortfolioPnl::default();
        for position in &self.positions {
            let underlying = position.underlying();
            let r = returns.get(underlying).copied().unwrap_or(0.0);
            let dv = iv_changes.get(underlying).copied().unwrap_or(0.0);
            let value = position.estimate_pnl(r, dv, elapsed_days);

            pnl.total += value;
            *pnl.by_position.entry(position.id().clone()).or_insert(0.0) += value;
        }
        pnl
    }

    /// Σ dollar delta / 100: P&L for a 1% move in every underlying.
    pub fn net_delta_usd_per_1pct(&self) -> f64 {
        self.positions.iter().map(Position::delta_dollars).sum::<f64>() / 100.0
    }

    /// [`Self::net_delta_usd_per_1pct`] as % of NAV.
    pub fn net_delta_pct(&self) -> f64 {
        self.pct_of_nav(self.net_delta_usd_per_1pct())
    }

    /// Dollar vega per vol point.
    pub fn net_vega(&self) -> f64 {
        self.positions.iter().map(Position::vega_dollars).sum()
    }

    /// Dollar theta per calendar day.
    pub fn net_theta_per_day(&self) -> f64 {
        self.positions.iter().map(Position::theta_dollars).sum()
    }

    /// Dollar gamma.
    pub fn net_gamma(&self) -> f64 {
        self.positions.iter().map(Position::gamma_dollars).sum()
    }

    /// Exposure snapshot.
    pub fn summary(&self) -> PortfolioSummary {
        let theta = self.net_theta_per_day();
        PortfolioSummary {
            nav: self.nav(),
            n_positions: self.len(),
            n_options: self.positions.iter().filter(|p| p.is_option()).count(),
            net_delta_pct: self.net_delta_pct(),
            net_delta_usd_per_1pct: self.net_delta_usd_per_1pct(),
            net_vega: self.net_vega(),
            net_theta_per_day: theta,
            net_gamma: self.net_gamma(),
            theta_carry_pct_6m: self.pct_of_nav(theta * THETA_CARRY_DAYS),
        }
    }

    /// `value / NAV × 100`, or 0 when NAV ≤ 0.
    fn pct_of_nav(&self, value: f64) -> f64 {
        let nav = self.nav();
        if nav > 0.0 {
            value / nav * 100.0
        } else {
            0.0
        }
    }
}
