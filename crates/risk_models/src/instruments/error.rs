//! Instrument error types.
//!
//! Raised only while constructing positions; valuation and P&L estimation
//! never fail.

use thiserror::Error;

/// Instrument-related errors.
///
/// # Examples
/// ```
/// use risk_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive or non-finite).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Non-finite quantity.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The invalid quantity
        quantity: f64,
    },

    /// Non-finite or negative price field.
    #[error("Invalid {field}: {value}")]
    InvalidPrice {
        /// Name of the offending field
        field: &'static str,
        /// The invalid value
        value: f64,
    },

    /// Non-finite entry implied volatility.
    #[error("Invalid implied volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Empty or malformed ticker symbol.
    #[error("Invalid symbol: {symbol:?}")]
    InvalidSymbol {
        /// The rejected symbol
        symbol: String,
    },

    /// OCC contract symbol could not be parsed.
    #[error("Invalid OCC symbol {symbol:?}: {reason}")]
    InvalidOccSymbol {
        /// The rejected contract symbol
        symbol: String,
        /// What was wrong with it
        reason: String,
    },
}
