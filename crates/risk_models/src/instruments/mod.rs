//! Tradable positions: shares, ETFs and listed options.
//!
//! - [`Position`]: one holding with entry state, cached greeks and a bounded
//!   Taylor-series P&L estimator
//! - [`Instrument`]: share or option (tagged enum, static dispatch)
//! - [`PositionId`]: `UNDERLYING` or `UNDERLYING/CONTRACT`
//! - [`OccSymbol`]: OCC contract symbol parsing and formatting
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** for static dispatch
//! - **Explicit valuation**: greeks change only through
//!   [`Position::compute_greeks`]
//! - **Validation at construction**: later operations never fail

pub mod contract;
pub mod error;
pub mod ids;
pub mod occ;
pub mod position;

pub use contract::{OptionContract, OptionRight};
pub use error::InstrumentError;
pub use ids::PositionId;
pub use occ::OccSymbol;
pub use position::{
    Instrument, Position, ValuationContext, DEFAULT_RISK_FREE_RATE, MAX_GAIN_NOTIONAL_MULTIPLE,
    OPTION_MULTIPLIER,
};
