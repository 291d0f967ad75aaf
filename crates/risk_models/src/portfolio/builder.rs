//! Builder for [`Portfolio`] with identity checks.

use std::collections::BTreeSet;

use super::error::PortfolioError;
use super::Portfolio;
use crate::instruments::Position;

/// Builder for constructing a [`Portfolio`].
///
/// Unlike [`Portfolio::new`], `build` rejects duplicate position identities
/// and a non-finite cash balance.
///
/// # Examples
///
/// ```
/// use risk_models::instruments::Position;
/// use risk_models::portfolio::PortfolioBuilder;
///
/// let portfolio = PortfolioBuilder::new()
///     .add_position(Position::share("SPY", -20.0, 585.0).unwrap())
///     .with_cash(50_000.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(portfolio.len(), 1);
/// assert_eq!(portfolio.nav(), 61_700.0);
/// ```
#[derive(Debug, Default)]
pub struct PortfolioBuilder {
    positions: Vec<Position>,
    cash: f64,
}

impl PortfolioBuilder {
    /// Creates an empty builder with zero cash.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a position.
    pub fn add_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    /// Appends several positions in order.
    pub fn add_positions(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.positions.extend(positions);
        self
    }

    /// Sets the cash balance (may be negative).
    pub fn with_cash(mut self, cash: f64) -> Self {
        self.cash = cash;
        self
    }

    /// Validates and builds the portfolio.
    ///
    /// # Errors
    /// - `PortfolioError::DuplicatePosition` if two positions share an identity
    /// - `PortfolioError::InvalidCash` if cash is not finite
    pub fn build(self) -> Result<Portfolio, PortfolioError> {
        if !self.cash.is_finite() {
            return Err(PortfolioError::InvalidCash(self.cash));
        }

        let mut seen = BTreeSet::new();
        for position in &self.positions {
            if !seen.insert(position.id().as_str()) {
                return Err(PortfolioError::DuplicatePosition(position.id().to_string()));
            }
        }

        Ok(Portfolio::new(self.positions, self.cash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder() {
        let portfolio = PortfolioBuilder::new().build().unwrap();
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.cash(), 0.0);
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let result = PortfolioBuilder::new()
            .add_positions([
                Position::share("SPY", 10.0, 585.0).unwrap(),
                Position::share("SPY", -5.0, 590.0).unwrap(),
            ])
            .build();
        assert_eq!(
            result.unwrap_err(),
            PortfolioError::DuplicatePosition("SPY".to_string())
        );
    }

    #[test]
    fn test_non_finite_cash_rejected() {
        let result = PortfolioBuilder::new().with_cash(f64::INFINITY).build();
        assert!(matches!(result, Err(PortfolioError::InvalidCash(_))));
    }

    #[test]
    fn test_preserves_order() {
        let portfolio = PortfolioBuilder::new()
            .add_position(Position::share("TLT", 1.0, 90.0).unwrap())
            .add_position(Position::share("GLD", 1.0, 240.0).unwrap())
            .build()
            .unwrap();
        let ids: Vec<&str> = portfolio.positions().iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, ["TLT", "GLD"]);
    }
}
