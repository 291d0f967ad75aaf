//! OCC option symbols.
//!
//! Layout: `UNDERLYING` + `YYMMDD` + `C|P` + 8-digit strike × 1000, e.g.
//! `SPY250321P00400000` is the SPY 400 put expiring 2025-03-21. The part after
//! the underlying is the *contract code* used in position identities.

use risk_core::types::Date;
use std::fmt;

use super::contract::OptionRight;
use super::error::InstrumentError;

/// Length of `YYMMDD` + right + strike.
const CONTRACT_CODE_LEN: usize = 6 + 1 + 8;
const STRIKE_SCALE: f64 = 1000.0;

/// A parsed OCC option symbol.
///
/// # Examples
/// ```
/// use risk_models::instruments::{OccSymbol, OptionRight};
///
/// let occ = OccSymbol::parse("GOOG251219C00355000", "GOOG").unwrap();
/// assert_eq!(occ.right(), OptionRight::Call);
/// assert_eq!(occ.strike(), 355.0);
/// assert_eq!(occ.expiry().to_string(), "2025-12-19");
/// assert_eq!(occ.contract_code(), "251219C00355000");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OccSymbol {
    underlying: String,
    expiry: Date,
    right: OptionRight,
    strike: f64,
}

impl OccSymbol {
    /// Builds a symbol from its parts.
    ///
    /// # Errors
    /// `InstrumentError::InvalidStrike` if the strike is non-positive or does
    /// not fit the 8-digit field.
    pub fn new(
        underlying: impl Into<String>,
        expiry: Date,
        right: OptionRight,
        strike: f64,
    ) -> Result<Self, InstrumentError> {
        let scaled = (strike * STRIKE_SCALE).round();
        if !(strike > 0.0) || !scaled.is_finite() || scaled > 99_999_999.0 {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        Ok(Self {
            underlying: underlying.into(),
            expiry,
            right,
            strike,
        })
    }

    /// Parses a full OCC symbol whose prefix must equal `underlying`.
    ///
    /// # Errors
    /// `InstrumentError::InvalidOccSymbol` for a wrong prefix, a code that is
    /// not exactly 15 characters,
    /// an impossible date, an unknown right or a non-numeric strike.
    pub fn parse(symbol: &str, underlying: &str) -> Result<Self, InstrumentError> {
        let code = symbol
            .strip_prefix(underlying)
            .ok_or_else(|| invalid(symbol, format!("does not start with {underlying:?}")))?;
        Self::parse_code(symbol, underlying, code)
    }

    /// Parses the contract code that follows the underlying (`250321P00400000`).
    pub fn parse_contract(underlying: &str, code: &str) -> Result<Self, InstrumentError> {
        Self::parse_code(code, underlying, code)
    }

    fn parse_code(symbol: &str, underlying: &str, code: &str) -> Result<Self, InstrumentError> {
        if code.len() != CONTRACT_CODE_LEN || !code.is_ascii() {
            return Err(invalid(
                symbol,
                format!("contract code is not {CONTRACT_CODE_LEN} characters (YYMMDD + C/P + strike)"),
            ));
        }

        let digits = |range: std::ops::Range<usize>, what: &str| -> Result<u32, InstrumentError> {
            let field = &code[range];
            if !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(symbol, format!("non-numeric {what} {field:?}")));
            }
            field
                .parse::<u32>()
                .map_err(|e| invalid(symbol, format!("bad {what}: {e}")))
        };

        let year = 2000 + digits(0..2, "year")? as i32;
        let month = digits(2..4, "month")?;
        let day = digits(4..6, "day")?;
        let expiry =
            Date::from_ymd(year, month, day).map_err(|e| invalid(symbol, e.to_string()))?;

        let right_code = char::from(code.as_bytes()[6]);
        let right = OptionRight::from_code(right_code)
            .ok_or_else(|| invalid(symbol, format!("unknown call/put code {right_code:?}")))?;

        let strike = f64::from(digits(7..15, "strike")?) / STRIKE_SCALE;
        if strike <= 0.0 {
            return Err(invalid(symbol, "zero strike"));
        }

        Ok(Self {
            underlying: underlying.to_string(),
            expiry,
            right,
            strike,
        })
    }

    /// Underlying ticker.
    #[inline]
    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Expiry date.
    #[inline]
    pub fn expiry(&self) -> Date {
        self.expiry
    }

    /// Call or put.
    #[inline]
    pub fn right(&self) -> OptionRight {
        self.right
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Contract code without the underlying prefix.
    pub fn contract_code(&self) -> String {
        format!(
            "{:02}{:02}{:02}{}{:08}",
            self.expiry.year().rem_euclid(100),
            self.expiry.month(),
            self.expiry.day(),
            self.right.code(),
            (self.strike * STRIKE_SCALE).round() as u64
        )
    }
}

impl fmt::Display for OccSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.underlying, self.contract_code())
    }
}

fn invalid(symbol: &str, reason: impl Into<String>) -> InstrumentError {
    InstrumentError::InvalidOccSymbol {
        symbol: symbol.to_string(),
        reason: reason.into(),
    }
}
