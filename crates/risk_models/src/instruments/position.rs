//! A single share or option position.
//!
//! Positions carry their entry state (quantity, entry price, entry underlying
//! price) and a cached set of greeks. Greeks are recomputed explicitly with
//! [`Position::compute_greeks`] against a caller-supplied
//! [`ValuationContext`]; nothing here reads a clock.
//!
//! P&L for a hypothetical move uses a second-order Taylor expansion around
//! the entry state and is bounded: a long option never loses more than its
//! notional, and no option gains more than ten times its notional.

use risk_core::types::{Date, DAYS_PER_YEAR};
use tracing::debug;

use super::contract::OptionContract;
use super::error::InstrumentError;
use super::ids::PositionId;
use super::occ::OccSymbol;
use crate::analytical::{BlackScholes, Greeks};

/// Shares controlled by one listed option contract.
pub const OPTION_MULTIPLIER: f64 = 100.0;

/// Default annual risk-free rate for greeks.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;

/// Option gains are capped at this multiple of notional.
pub const MAX_GAIN_NOTIONAL_MULTIPLE: f64 = 10.0;

/// What a position holds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Instrument {
    /// Equity or ETF shares.
    Share,
    /// Listed option on the underlying.
    Option(OptionContract),
}

/// Market state against which greeks are computed.
///
/// # Examples
/// ```
/// use risk_core::types::Date;
/// use risk_models::instruments::ValuationContext;
///
/// let as_of = Date::from_ymd(2024, 12, 21).unwrap();
/// let ctx = ValuationContext::new(585.0, 0.20, as_of).with_rate(0.05);
/// assert_eq!(ctx.rate, 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationContext {
    /// Underlying price
    pub underlying_price: f64,
    /// Implied volatility as a fraction
    pub implied_vol: f64,
    /// Valuation date
    pub as_of: Date,
    /// Annual risk-free rate
    pub rate: f64,
}

impl ValuationContext {
    /// Context at the default risk-free rate.
    pub fn new(underlying_price: f64, implied_vol: f64, as_of: Date) -> Self {
        Self {
            underlying_price,
            implied_vol,
            as_of,
            rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// Overrides the risk-free rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }
}

/// One holding in a portfolio.
///
/// # Examples
/// ```
/// use risk_core::types::Date;
/// use risk_models::instruments::{Position, ValuationContext};
///
/// let as_of = Date::from_ymd(2024, 12, 21).unwrap();
/// let mut put = Position::from_occ("SPY", "SPY250321P00400000", 10.0, 5.50, 585.0, 0.20).unwrap();
/// put.compute_greeks(&ValuationContext::new(585.0, 0.20, as_of));
///
/// assert_eq!(put.days_to_expiry(), 90);
/// assert_eq!(put.notional(), 5_500.0);
/// // A long option never loses more than the premium paid.
/// assert!(put.estimate_pnl(0.50, -30.0, 180) >= -5_500.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    id: PositionId,
    instrument: Instrument,
    quantity: f64,
    entry_price: f64,
    entry_underlying_price: f64,
    greeks: Greeks<f64>,
    days_to_expiry: u32,
}

impl Position {
    /// Share or ETF position.
    ///
    /// Delta is set to the sign of the quantity immediately; shares need no
    /// valuation context.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidSymbol` for an empty symbol or one containing `/`
    /// - `InstrumentError::InvalidQuantity` / `InvalidPrice` for non-finite inputs
    pub fn share(
        symbol: impl Into<String>,
        quantity: f64,
        entry_price: f64,
    ) -> Result<Self, InstrumentError> {
        let symbol = symbol.into();
        validate_symbol(&symbol)?;
        validate_common(quantity, entry_price, entry_price)?;

        Ok(Self {
            id: PositionId::new(symbol),
            instrument: Instrument::Share,
            quantity,
            entry_price,
            entry_underlying_price: entry_price,
            greeks: share_greeks(quantity),
            days_to_expiry: 0,
        })
    }

    /// Option position identified as `UNDERLYING/CONTRACT`.
    ///
    /// Greeks start at zero until [`Position::compute_greeks`] is called.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidSymbol` for an empty underlying or contract
    /// - `InstrumentError::InvalidQuantity` / `InvalidPrice` for bad inputs
    pub fn option(
        underlying: &str,
        contract_symbol: &str,
        contract: OptionContract,
        quantity: f64,
        entry_price: f64,
        entry_underlying_price: f64,
    ) -> Result<Self, InstrumentError> {
        validate_symbol(underlying)?;
        validate_symbol(contract_symbol)?;
        validate_common(quantity, entry_price, entry_underlying_price)?;

        Ok(Self {
            id: PositionId::option(underlying, contract_symbol),
            instrument: Instrument::Option(contract),
            quantity,
            entry_price,
            entry_underlying_price,
            greeks: Greeks::zero(),
            days_to_expiry: 0,
        })
    }

    /// Option position built from a full OCC symbol.
    ///
    /// The identity uses the contract code after the underlying, so
    /// `SPY250321P00400000` becomes `SPY/250321P00400000`.
    pub fn from_occ(
        underlying: &str,
        occ_symbol: &str,
        quantity: f64,
        entry_price: f64,
        entry_underlying_price: f64,
        entry_iv: f64,
    ) -> Result<Self, InstrumentError> {
        let occ = OccSymbol::parse(occ_symbol, underlying)?;
        let contract = OptionContract::new(occ.right(), occ.strike(), occ.expiry(), entry_iv)?;
        Self::option(
            underlying,
            &occ.contract_code(),
            contract,
            quantity,
            entry_price,
            entry_underlying_price,
        )
    }

    /// Position identity.
    #[inline]
    pub fn id(&self) -> &PositionId {
        &self.id
    }

    /// Underlying ticker.
    #[inline]
    pub fn underlying(&self) -> &str {
        self.id.underlying()
    }

    /// Share or option terms.
    #[inline]
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Option terms, if this is an option.
    pub fn option_contract(&self) -> Option<&OptionContract> {
        match &self.instrument {
            Instrument::Option(contract) => Some(contract),
            Instrument::Share => None,
        }
    }

    /// Returns `true` for option positions.
    #[inline]
    pub fn is_option(&self) -> bool {
        matches!(self.instrument, Instrument::Option(_))
    }

    /// Signed quantity: shares, or contracts for options.
    #[inline]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Entry price per share (premium per share for options).
    #[inline]
    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    /// Underlying price at entry.
    #[inline]
    pub fn entry_underlying_price(&self) -> f64 {
        self.entry_underlying_price
    }

    /// Cached greeks from the last valuation.
    #[inline]
    pub fn greeks(&self) -> &Greeks<f64> {
        &self.greeks
    }

    /// Days to expiry cached with the greeks; always 0 for shares.
    #[inline]
    pub fn days_to_expiry(&self) -> u32 {
        self.days_to_expiry
    }

    /// 100 for options, 1 for shares.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        if self.is_option() {
            OPTION_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Absolute dollar size at entry.
    #[inline]
    pub fn notional(&self) -> f64 {
        (self.quantity * self.multiplier() * self.entry_price).abs()
    }

    /// Recomputes and caches greeks and days to expiry.
    ///
    /// Options with no time left, a non-positive spot or volatility, or a
    /// numerically unstable result get zero greeks. Shares keep
    /// `delta = sign(quantity)`.
    pub fn compute_greeks(&mut self, ctx: &ValuationContext) -> Greeks<f64> {
        let (greeks, dte) = match &self.instrument {
            Instrument::Share => (share_greeks(self.quantity), 0),
            Instrument::Option(contract) => {
                let dte = contract.days_to_expiry(ctx.as_of);
                (option_greeks(&self.id, contract, dte, ctx), dte)
            }
        };
        self.greeks = greeks;
        self.days_to_expiry = dte;
        greeks
    }

    /// Estimated P&L for an underlying return (fraction), an implied
    /// volatility change (vol points) and elapsed calendar days.
    ///
    /// Shares: `q · entry_price · r`, never bounded. Options:
    /// `q·100·(δ·ΔS + ½Γ·ΔS² + vega·Δσ) + q·100·θ·min(days, dte)` with
    /// `ΔS = entry_underlying_price · r`, floored at `-notional` for long
    /// options and capped at `10 × notional` for every option.
    pub fn estimate_pnl(&self, underlying_return: f64, iv_change_pts: f64, elapsed_days: u32) -> f64 {
        match &self.instrument {
            Instrument::Share => self.quantity * self.entry_price * underlying_return,
            Instrument::Option(_) => {
                let g = &self.greeks;
                let scale = self.quantity * OPTION_MULTIPLIER;
                let ds = self.entry_underlying_price * underlying_return;
                let decay_days = f64::from(elapsed_days.min(self.days_to_expiry));

                let taylor = scale * (g.delta * ds + 0.5 * g.gamma * ds * ds + g.vega * iv_change_pts);
                let pnl = taylor + scale * g.theta * decay_days;
                self.bound_option_pnl(pnl)
            }
        }
    }

    fn bound_option_pnl(&self, pnl: f64) -> f64 {
        let notional = self.notional();
        let floored = if self.quantity > 0.0 {
            pnl.max(-notional)
        } else {
            pnl
        };
        floored.min(MAX_GAIN_NOTIONAL_MULTIPLE * notional)
    }

    /// Dollar delta.
    ///
    /// Options: `q · 100 · δ · S_entry`. Shares: `|q| · δ · P_entry`, since a
    /// share's δ already carries the sign of `q`.
    pub fn delta_dollars(&self) -> f64 {
        if self.is_option() {
            self.quantity * OPTION_MULTIPLIER * self.greeks.delta * self.entry_underlying_price
        } else {
            self.quantity.abs() * self.greeks.delta * self.entry_price
        }
    }

    /// Dollar vega per vol point (0 for shares).
    pub fn vega_dollars(&self) -> f64 {
        self.option_scaled(self.greeks.vega)
    }

    /// Dollar theta per calendar day (0 for shares).
    pub fn theta_dollars(&self) -> f64 {
        self.option_scaled(self.greeks.theta)
    }

    /// Dollar gamma (0 for shares).
    pub fn gamma_dollars(&self) -> f64 {
        self.option_scaled(self.greeks.gamma)
    }

    #[inline]
    fn option_scaled(&self, x: f64) -> f64 {
        if self.is_option() {
            self.quantity * OPTION_MULTIPLIER * x
        } else {
            0.0
        }
    }
}

fn share_greeks(quantity: f64) -> Greeks<f64> {
    let delta = if quantity > 0.0 {
        1.0
    } else if quantity < 0.0 {
        -1.0
    } else {
        0.0
    };
    Greeks {
        delta,
        ..Greeks::zero()
    }
}

fn option_greeks(
    id: &PositionId,
    contract: &OptionContract,
    dte: u32,
    ctx: &ValuationContext,
) -> Greeks<f64> {
    if dte == 0 {
        debug!(position = %id, "expired option, greeks zeroed");
        return Greeks::zero();
    }

    let expiry = f64::from(dte) / DAYS_PER_YEAR;
    let result = BlackScholes::new(ctx.underlying_price, ctx.rate, ctx.implied_vol)
        .and_then(|bs| bs.sensitivities(contract.strike(), expiry, contract.right()));

    match result {
        Ok(greeks) => greeks,
        Err(err) => {
            debug!(position = %id, error = %err, "greeks zeroed");
            Greeks::zero()
        }
    }
}

fn validate_symbol(symbol: &str) -> Result<(), InstrumentError> {
    if symbol.trim().is_empty() || symbol.contains(super::ids::CONTRACT_SEPARATOR) {
        return Err(InstrumentError::InvalidSymbol {
            symbol: symbol.to_string(),
        });
    }
    Ok(())
}

fn validate_common(
    quantity: f64,
    entry_price: f64,
    entry_underlying_price: f64,
) -> Result<(), InstrumentError> {
    if !quantity.is_finite() {
        return Err(InstrumentError::InvalidQuantity { quantity });
    }
    for (field, value) in [
        ("entry price", entry_price),
        ("entry underlying price", entry_underlying_price),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(InstrumentError::InvalidPrice { field, value });
        }
    }
    Ok(())
}
