//! Position identity.
//!
//! A share or ETF position is identified by its ticker (`SPY`); an option
//! position by `UNDERLYING/CONTRACT` (`SPY/250321P00400000`). The underlying
//! is always the part before the first `/`.

use std::fmt;

/// Separator between the underlying and the option contract symbol.
pub const CONTRACT_SEPARATOR: char = '/';

/// Unique identifier for a position.
///
/// # Examples
///
/// ```
/// use risk_models::instruments::PositionId;
///
/// let put = PositionId::option("SPY", "250321P00400000");
/// assert_eq!(put.as_str(), "SPY/250321P00400000");
/// assert_eq!(put.underlying(), "SPY");
/// assert_eq!(put.contract(), Some("250321P00400000"));
///
/// let shares = PositionId::new("SPY");
/// assert_eq!(shares.underlying(), "SPY");
/// assert_eq!(shares.contract(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PositionId(String);

impl PositionId {
    /// Creates an identifier from its full text.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates an option identifier `UNDERLYING/CONTRACT`.
    pub fn option(underlying: &str, contract: &str) -> Self {
        Self(format!("{underlying}{CONTRACT_SEPARATOR}{contract}"))
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Underlying symbol: the identity with any `/CONTRACT` suffix stripped.
    #[inline]
    pub fn underlying(&self) -> &str {
        underlying_of(&self.0)
    }

    /// Contract symbol after the separator, if any.
    pub fn contract(&self) -> Option<&str> {
        self.0
            .split_once(CONTRACT_SEPARATOR)
            .map(|(_, contract)| contract)
    }
}

/// Strips an option suffix from a position identity.
///
/// ```
/// use risk_models::instruments::ids::underlying_of;
///
/// assert_eq!(underlying_of("HYG/250620P00072000"), "HYG");
/// assert_eq!(underlying_of("HYG"), "HYG");
/// ```
#[inline]
pub fn underlying_of(id: &str) -> &str {
    id.split(CONTRACT_SEPARATOR).next().unwrap_or(id)
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PositionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PositionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for PositionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_id_layout() {
        let id = PositionId::option("VIX", "250221C00025000");
        assert_eq!(id.to_string(), "VIX/250221C00025000");
        assert_eq!(id.underlying(), "VIX");
    }

    #[test]
    fn test_share_id_has_no_contract() {
        let id: PositionId = "HYG".into();
        assert_eq!(id.underlying(), "HYG");
        assert!(id.contract().is_none());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut ids = vec![
            PositionId::new("SPY/250321P00400000"),
            PositionId::new("HYG"),
            PositionId::new("SPY"),
        ];
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(PositionId::as_str).collect();
        assert_eq!(sorted, ["HYG", "SPY", "SPY/250321P00400000"]);
    }

    #[test]
    fn test_underlying_of_empty_string() {
        assert_eq!(underlying_of(""), "");
    }
}
