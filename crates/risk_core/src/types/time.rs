//! Caller-supplied calendar dates.
//!
//! Nothing in the workspace reads the system clock: valuation dates are
//! always passed in, which keeps replays and tests deterministic.
//!
//! # Examples
//!
//! ```
//! use risk_core::types::time::Date;
//!
//! let as_of = Date::from_ymd(2025, 1, 1).unwrap();
//! let expiry = as_of.add_days(90);
//! assert_eq!(expiry.days_since(as_of), 90);
//! assert_eq!(as_of.days_since(expiry), -90);
//! ```

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Calendar days per year used for option time-to-expiry (ACT/365).
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Type-safe date wrapper around `chrono::NaiveDate`.
///
/// Serialises as an ISO 8601 string (`YYYY-MM-DD`) when the `serde`
/// feature is enabled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from year, month and day.
    ///
    /// # Errors
    /// `DateError::InvalidDate` for impossible dates such as February 30th.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses an ISO 8601 date (`YYYY-MM-DD`).
    ///
    /// # Examples
    /// ```
    /// use risk_core::types::time::Date;
    ///
    /// assert!(Date::parse("2025-03-21").is_ok());
    /// assert!(Date::parse("21/03/2025").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying `NaiveDate`.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Signed number of calendar days from `earlier` to `self`.
    #[inline]
    pub fn days_since(&self, earlier: Date) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// Returns the date `days` calendar days later.
    ///
    /// Saturates at the latest representable date.
    pub fn add_days(&self, days: u32) -> Date {
        Date(
            self.0
                .checked_add_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MAX),
        )
    }

    /// ACT/365 year fraction from `start` to `self` (negative if `self` is earlier).
    #[inline]
    pub fn year_fraction_since(&self, start: Date) -> f64 {
        self.days_since(start) as f64 / DAYS_PER_YEAR
    }
}

impl Sub for Date {
    type Output = i64;

    /// Number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        self.days_since(other)
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}
