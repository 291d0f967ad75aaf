//! Integration tests for position and portfolio invariants.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use proptest::prelude::*;
use risk_core::types::Date;
use risk_models::demo::{reference_quotes, tail_hedge_book};
use risk_models::instruments::{Position, ValuationContext};
use risk_models::portfolio::{Portfolio, PortfolioError};

fn as_of() -> Date {
    Date::from_ymd(2024, 12, 21).unwrap()
}

#[test]
fn test_revaluing_at_expiry_zeroes_all_option_greeks() {
    let mut book = tail_hedge_book(as_of()).unwrap();
    let far_future = as_of().add_days(400);
    book.compute_greeks(&reference_quotes(), far_future, 0.045);

    for position in book.positions() {
        if position.is_option() {
            assert_eq!(position.days_to_expiry(), 0);
            assert!(position.greeks().is_zero(), "{}", position.id());
        }
    }
    assert_eq!(book.net_vega(), 0.0);
    assert_eq!(book.net_theta_per_day(), 0.0);
}

#[test]
fn test_exposures_track_revaluation() {
    let mut book = tail_hedge_book(as_of()).unwrap();
    let before = book.net_vega();

    let mut quotes = reference_quotes();
    if let Some(spy) = quotes.get_mut("SPY") {
        spy.price = 450.0;
    }
    book.compute_greeks(&quotes, as_of(), 0.045);

    // SPY closer to the 400 strike: more vega on the puts.
    assert!(book.net_vega() > before);
}

#[test]
fn test_duplicate_identity_rejected_by_builder() {
    let put = Position::from_occ("SPY", "SPY250321P00400000", 1.0, 5.0, 585.0, 0.2).unwrap();
    let result = Portfolio::builder()
        .add_position(put.clone())
        .add_position(put)
        .build();
    assert!(matches!(result, Err(PortfolioError::DuplicatePosition(id)) if id == "SPY/250321P00400000"));
}

#[test]
fn test_share_only_portfolio_three_components_exact() {
    let portfolio = Portfolio::new(vec![Position::share("IWM", 37.0, 221.25).unwrap()], 0.0);
    let returns = BTreeMap::from([("IWM".to_string(), 4.5)]);
    let pnl = portfolio.estimate_pnl(&returns, &BTreeMap::new(), 9_999);
    let expected = 37.0 * 221.25 * 4.5;
    assert_eq!(pnl.total, expected);
    assert_eq!(pnl.by_position.values().copied().collect::<Vec<_>>(), [expected]);
}

proptest! {
    #[test]
    fn prop_expired_options_have_zero_greeks(
        spot in 1.0_f64..1_000.0,
        vol in 0.01_f64..2.0,
        days_past in 0_u32..500,
    ) {
        let mut put = Position::from_occ("SPY", "SPY250321P00400000", 3.0, 5.0, 585.0, 0.2).unwrap();
        let expiry = Date::from_ymd(2025, 3, 21).unwrap();
        put.compute_greeks(&ValuationContext::new(spot, vol, expiry.add_days(days_past)));
        prop_assert_eq!(put.days_to_expiry(), 0);
        prop_assert!(put.greeks().is_zero());
    }

    #[test]
    fn prop_estimate_pnl_idempotent(r in -0.9_f64..2.0, dv in -50.0_f64..100.0, days in 0_u32..400) {
        let book = tail_hedge_book(as_of()).unwrap();
        let returns: BTreeMap<String, f64> = book.underlyings().into_iter().map(|u| (u, r)).collect();
        let ivs: BTreeMap<String, f64> = book.underlyings().into_iter().map(|u| (u, dv)).collect();
        let first = book.estimate_pnl(&returns, &ivs, days);
        let second = book.estimate_pnl(&returns, &ivs, days);
        prop_assert_eq!(&first, &second);
        assert_relative_eq!(first.total, first.by_position.values().sum::<f64>(), epsilon = 1e-6);
    }
}
