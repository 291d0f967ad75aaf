//! Integration tests for module exports.

#[test]
fn test_analytical_exports() {
    use risk_models::analytical::{AnalyticalError, BlackScholes, Greeks};

    let bs = BlackScholes::new(100.0_f64, 0.045, 0.2).unwrap();
    let _: Greeks<f64> = Greeks::zero();
    let _ = bs.d1(100.0, 1.0);
    let _ = AnalyticalError::InvalidSpot { spot: 0.0 };
}

#[test]
fn test_instrument_exports() {
    use risk_models::instruments::{
        Instrument, InstrumentError, OccSymbol, OptionContract, OptionRight, Position, PositionId,
        ValuationContext, DEFAULT_RISK_FREE_RATE, OPTION_MULTIPLIER,
    };

    assert_eq!(OPTION_MULTIPLIER, 100.0);
    assert_eq!(DEFAULT_RISK_FREE_RATE, 0.045);
    let share = Position::share("SPY", 1.0, 1.0).unwrap();
    assert_eq!(share.instrument(), &Instrument::Share);
    let _ = PositionId::new("SPY");
    let _ = OptionRight::Call;
    let _: Option<&OptionContract> = share.option_contract();
    let _: Result<OccSymbol, InstrumentError> = OccSymbol::parse("X", "X");
    let _ = ValuationContext::new;
}

#[test]
fn test_portfolio_exports() {
    use risk_models::portfolio::{
        Portfolio, PortfolioBuilder, PortfolioError, PortfolioPnl, PortfolioSummary,
        UnderlyingQuote,
    };

    let portfolio: Portfolio = PortfolioBuilder::new().build().unwrap();
    let _: PortfolioSummary = portfolio.summary();
    let _ = PortfolioPnl::default();
    let _ = UnderlyingQuote::new(1.0, 0.2);
    let _ = PortfolioError::InvalidCash(f64::NAN);
}
