//! Simulate command implementation
//!
//! Runs one regime over the book and prints the risk summary.

use std::path::Path;

use risk_engine::{
    IvAnchor, MarketRegime, RiskAnalyzer, RiskSummary, ScenarioAssumptions, ScenarioGenerator,
};
use risk_models::portfolio::PortfolioSummary;
use serde::Serialize;
use tracing::info;

use super::Book;
use crate::{CliError, Result};

/// Command-line options of `risk simulate`; unset values come from the book.
#[derive(Debug, Clone, Default)]
pub struct SimulateOptions {
    /// Regime label
    pub regime: Option<String>,
    /// Horizon in months
    pub horizon_months: Option<u32>,
    /// Scenario count
    pub scenarios: Option<usize>,
    /// Base seed
    pub seed: Option<u64>,
    /// IV anchor
    pub iv_anchor: Option<IvAnchor>,
}

/// Output of the simulate command.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    /// Regime label used
    pub regime: String,
    /// Horizon in months
    pub horizon_months: u32,
    /// Base seed
    pub seed: u64,
    /// IV anchor
    pub iv_anchor: IvAnchor,
    /// Exposures at the start of the horizon
    pub portfolio: PortfolioSummary,
    /// Scenario metrics
    pub risk: RiskSummary,
}

/// Runs the simulation for a loaded book.
pub fn report(book: &Book, options: &SimulateOptions) -> Result<SimulationReport> {
    let section = &book.config.simulation;
    let label = options.regime.as_deref().unwrap_or(&section.regime);
    let regime = MarketRegime::lookup(label)
        .ok_or_else(|| CliError::InvalidArgument(format!("Unknown regime: {label}")))?;
    let horizon = options.horizon_months.unwrap_or(section.horizon_months);

    let mut assumptions = ScenarioAssumptions::for_regime(regime, horizon);
    if let Some(adj) = &section.adjustments {
        assumptions = assumptions.with_adjustments(adj, format!("{}_adjusted", regime.name()));
    }

    let config = book.simulation_config(options.scenarios, options.seed, options.iv_anchor)?;

    let results = ScenarioGenerator::new(&book.portfolio, &assumptions, &config)?.generate();
    let risk = RiskAnalyzer::new().analyze(&results);
    info!(
        regime = %assumptions.label(),
        var_95_pct = risk.var_95_pct,
        cvar_95_pct = risk.cvar_95_pct,
        "simulation complete"
    );

    Ok(SimulationReport {
        regime: assumptions.label().to_string(),
        horizon_months: horizon,
        seed: config.seed(),
        iv_anchor: config.iv_anchor(),
        portfolio: book.portfolio.summary(),
        risk,
    })
}

/// Run the simulate command
pub fn run(book: Option<&Path>, options: &SimulateOptions) -> Result<()> {
    let book = Book::load(book)?;
    super::print_json(&report(&book, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(regime: &str) -> SimulateOptions {
        SimulateOptions {
            regime: Some(regime.to_string()),
            horizon_months: Some(6),
            scenarios: Some(500),
            seed: Some(3),
            iv_anchor: None,
        }
    }

    #[test]
    fn test_report() {
        let book = Book::load(None).unwrap();
        let report = report(&book, &options("crash")).unwrap();
        assert_eq!(report.regime, "risk_off");
        assert_eq!(report.risk.n_scenarios, 500);
        assert_eq!(report.seed, 3);
        assert_eq!(report.iv_anchor, IvAnchor::EntryIv);
        assert!(report.risk.var_99_pct <= report.risk.var_95_pct);
    }

    #[test]
    fn test_fixed_anchor_option() {
        let book = Book::load(None).unwrap();
        let mut opts = options("neutral");
        opts.iv_anchor = Some(IvAnchor::Fixed(0.20));
        let report = report(&book, &opts).unwrap();
        assert_eq!(report.iv_anchor, IvAnchor::Fixed(0.20));
        assert_eq!(report.seed, 3);
    }

    #[test]
    fn test_unknown_regime_rejected() {
        let book = Book::load(None).unwrap();
        let err = report(&book, &options("euphoria")).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let book = Book::load(None).unwrap();
        let mut opts = options("neutral");
        opts.horizon_months = Some(0);
        assert!(matches!(report(&book, &opts), Err(CliError::Config(_))));
    }

    #[test]
    fn test_report_serialises() {
        let book = Book::load(None).unwrap();
        let report = report(&book, &options("vol_crush")).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["risk"]["n_scenarios"], 500);
        assert!(json["risk"]["cvar_attribution"].is_array());
    }
}
