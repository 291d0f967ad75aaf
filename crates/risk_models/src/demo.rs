//! Example tail-hedge book.
//!
//! A small macro book used by integration tests, benchmarks and the CLI:
//!
//! - long 10 SPY $400 puts (90 days), short 20 SPY shares
//! - long 5 VIX $25 calls (62 days)
//! - long 15 HYG $72 puts (181 days)
//! - $50,000 cash
//!
//! Expiries are set relative to the caller's `as_of` date so the book never
//! ages out.

use std::collections::BTreeMap;

use risk_core::types::Date;

use crate::instruments::{OccSymbol, OptionContract, OptionRight, Position, DEFAULT_RISK_FREE_RATE};
use crate::portfolio::{Portfolio, PortfolioError, UnderlyingQuote};

/// Cash held by the demo book.
pub const DEMO_CASH: f64 = 50_000.0;

// =============================================================================
// Reference market
// =============================================================================

/// Quotes the demo book is valued against: SPY 585 / 20%, VIX 14.9 / 90%,
/// HYG 75.5 / 18%.
pub fn reference_quotes() -> BTreeMap<String, UnderlyingQuote> {
    BTreeMap::from([
        ("HYG".to_string(), UnderlyingQuote::new(75.5, 0.18)),
        ("SPY".to_string(), UnderlyingQuote::new(585.0, 0.20)),
        ("VIX".to_string(), UnderlyingQuote::new(14.9, 0.90)),
    ])
}

// =============================================================================
// Positions
// =============================================================================

struct DemoOption {
    underlying: &'static str,
    right: OptionRight,
    strike: f64,
    days: u32,
    quantity: f64,
    premium: f64,
}

const DEMO_OPTIONS: [DemoOption; 3] = [
    DemoOption {
        underlying: "SPY",
        right: OptionRight::Put,
        strike: 400.0,
        days: 90,
        quantity: 10.0,
        premium: 5.50,
    },
    DemoOption {
        underlying: "VIX",
        right: OptionRight::Call,
        strike: 25.0,
        days: 62,
        quantity: 5.0,
        premium: 2.80,
    },
    DemoOption {
        underlying: "HYG",
        right: OptionRight::Put,
        strike: 72.0,
        days: 181,
        quantity: 15.0,
        premium: 1.20,
    },
];

fn demo_option(leg: &DemoOption, as_of: Date) -> Result<Position, PortfolioError> {
    let quotes = reference_quotes();
    let quote = quotes
        .get(leg.underlying)
        .copied()
        .unwrap_or(UnderlyingQuote::new(0.0, 0.0));
    let expiry = as_of.add_days(leg.days);
    let occ = OccSymbol::new(leg.underlying, expiry, leg.right, leg.strike)?;
    let contract = OptionContract::new(leg.right, leg.strike, expiry, quote.implied_vol)?;

    Ok(Position::option(
        leg.underlying,
        &occ.contract_code(),
        contract,
        leg.quantity,
        leg.premium,
        quote.price,
    )?)
}

/// Builds the demo book with greeks computed at [`reference_quotes`].
///
/// # Examples
/// ```
/// use risk_core::types::Date;
/// use risk_models::demo::tail_hedge_book;
///
/// let book = tail_hedge_book(Date::from_ymd(2024, 12, 21).unwrap()).unwrap();
/// assert_eq!(book.len(), 4);
/// assert_eq!(book.positions()[0].id().as_str(), "SPY/250321P00400000");
/// ```
pub fn tail_hedge_book(as_of: Date) -> Result<Portfolio, PortfolioError> {
    let mut positions = Vec::with_capacity(DEMO_OPTIONS.len() + 1);
    positions.push(demo_option(&DEMO_OPTIONS[0], as_of)?);
    positions.push(Position::share("SPY", -20.0, 585.0)?);
    for leg in &DEMO_OPTIONS[1..] {
        positions.push(demo_option(leg, as_of)?);
    }

    let mut portfolio = Portfolio::builder()
        .add_positions(positions)
        .with_cash(DEMO_CASH)
        .build()?;
    portfolio.compute_greeks(&reference_quotes(), as_of, DEFAULT_RISK_FREE_RATE);
    Ok(portfolio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn book() -> Portfolio {
        tail_hedge_book(Date::from_ymd(2024, 12, 21).unwrap()).unwrap()
    }

    #[test]
    fn test_demo_nav() {
        // 5,500 + 11,700 + 1,400 + 1,800 + 50,000
        assert_relative_eq!(book().nav(), 70_400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_demo_identities() {
        let ids: Vec<String> = book().positions().iter().map(|p| p.id().to_string()).collect();
        assert_eq!(
            ids,
            [
                "SPY/250321P00400000",
                "SPY",
                "VIX/250221C00025000",
                "HYG/250620P00072000"
            ]
        );
    }

    #[test]
    fn test_demo_greeks_are_valued() {
        let book = book();
        let put = &book.positions()[0];
        assert_eq!(put.days_to_expiry(), 90);
        assert!(put.greeks().delta < 0.0);
        assert!(book.positions()[2].greeks().delta > 0.0);
        assert!(book.net_vega() > 0.0);
        assert!(book.net_theta_per_day() < 0.0);
    }

    #[test]
    fn test_demo_underlyings() {
        let underlyings: Vec<String> = book().underlyings().into_iter().collect();
        assert_eq!(underlyings, ["HYG", "SPY", "VIX"]);
    }
}
