//! Listed option contract terms.

use risk_core::types::Date;
use std::fmt;

use super::error::InstrumentError;

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionRight {
    /// Right to buy the underlying.
    Call,
    /// Right to sell the underlying.
    Put,
}

impl OptionRight {
    /// Returns `true` for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionRight::Call)
    }

    /// Single-letter OCC code (`C` or `P`).
    #[inline]
    pub fn code(&self) -> char {
        match self {
            OptionRight::Call => 'C',
            OptionRight::Put => 'P',
        }
    }

    /// Parses an OCC right code, case-insensitively.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'C' => Some(OptionRight::Call),
            'P' => Some(OptionRight::Put),
            _ => None,
        }
    }
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionRight::Call => write!(f, "call"),
            OptionRight::Put => write!(f, "put"),
        }
    }
}

/// Terms of one listed option contract.
///
/// # Examples
/// ```
/// use risk_core::types::Date;
/// use risk_models::instruments::{OptionContract, OptionRight};
///
/// let expiry = Date::from_ymd(2025, 3, 21).unwrap();
/// let put = OptionContract::new(OptionRight::Put, 400.0, expiry, 0.20).unwrap();
/// assert_eq!(put.strike(), 400.0);
///
/// assert!(OptionContract::new(OptionRight::Put, 0.0, expiry, 0.20).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    right: OptionRight,
    strike: f64,
    expiry: Date,
    entry_iv: f64,
}

impl OptionContract {
    /// Creates contract terms.
    ///
    /// `entry_iv` is a fraction (0.25 = 25%). A non-positive IV is accepted
    /// and simply produces zero greeks.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidStrike` if strike <= 0 or not finite
    /// - `InstrumentError::InvalidVolatility` if `entry_iv` is not finite
    pub fn new(
        right: OptionRight,
        strike: f64,
        expiry: Date,
        entry_iv: f64,
    ) -> Result<Self, InstrumentError> {
        if !(strike > 0.0) || !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if !entry_iv.is_finite() {
            return Err(InstrumentError::InvalidVolatility {
                volatility: entry_iv,
            });
        }
        Ok(Self {
            right,
            strike,
            expiry,
            entry_iv,
        })
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

    /// Expiry date.
    #[inline]
    pub fn expiry(&self) -> Date {
        self.expiry
    }

    /// Implied volatility at entry, as a fraction.
    #[inline]
    pub fn entry_iv(&self) -> f64 {
        self.entry_iv
    }

    /// Calendar days from `as_of` to expiry, clamped at zero.
    #[inline]
    pub fn days_to_expiry(&self, as_of: Date) -> u32 {
        u32::try_from(self.expiry.days_since(as_of).max(0)).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiry() -> Date {
        Date::from_ymd(2025, 3, 21).unwrap()
    }

    #[test]
    fn test_right_codes() {
        assert_eq!(OptionRight::Call.code(), 'C');
        assert_eq!(OptionRight::from_code('p'), Some(OptionRight::Put));
        assert_eq!(OptionRight::from_code('X'), None);
    }

    #[test]
    fn test_rejects_nan_iv() {
        assert!(matches!(
            OptionContract::new(OptionRight::Call, 25.0, expiry(), f64::NAN),
            Err(InstrumentError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_zero_iv_is_accepted() {
        assert!(OptionContract::new(OptionRight::Call, 25.0, expiry(), 0.0).is_ok());
    }

    #[test]
    fn test_days_to_expiry_clamped() {
        let contract = OptionContract::new(OptionRight::Put, 400.0, expiry(), 0.2).unwrap();
        let before = Date::from_ymd(2024, 12, 21).unwrap();
        let after = Date::from_ymd(2025, 4, 1).unwrap();
        assert_eq!(contract.days_to_expiry(before), 90);
        assert_eq!(contract.days_to_expiry(after), 0);
        assert_eq!(contract.days_to_expiry(expiry()), 0);
    }
}
