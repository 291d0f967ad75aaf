//! Blend command implementation
//!
//! Runs a regime-weighted simulation from `regime=weight` pairs.

use std::collections::BTreeMap;
use std::path::Path;

use risk_engine::{run_blended, BlendedSummary, MarketRegime};

use super::Book;
use crate::{CliError, Result};

/// Parses `risk_off=0.3,neutral=0.7`.
///
/// Labels use the strict regime lookup; repeating a regime is an error.
pub fn parse_weights(pairs: &str) -> Result<BTreeMap<MarketRegime, f64>> {
    let mut weights = BTreeMap::new();
    for pair in pairs.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (label, value) = pair
            .split_once('=')
            .ok_or_else(|| CliError::InvalidArgument(format!("expected regime=weight, got '{pair}'")))?;
        let regime: MarketRegime = label.parse()?;
        let weight: f64 = value.trim().parse().map_err(|_| {
            CliError::InvalidArgument(format!("weight for {label} is not a number: '{value}'"))
        })?;
        if weights.insert(regime, weight).is_some() {
            return Err(CliError::InvalidArgument(format!("regime {regime} given twice")));
        }
    }
    if weights.is_empty() {
        return Err(CliError::InvalidArgument("no regime weights given".to_string()));
    }
    Ok(weights)
}

/// Runs the blend for a loaded book.
pub fn report(
    book: &Book,
    weights: &BTreeMap<MarketRegime, f64>,
    horizon_months: Option<u32>,
    scenarios: Option<usize>,
    seed: Option<u64>,
) -> Result<BlendedSummary> {
    let section = &book.config.simulation;
    let config = book.simulation_config(scenarios, seed, None)?;
    Ok(run_blended(
        &book.portfolio,
        weights,
        horizon_months.unwrap_or(section.horizon_months),
        &config,
        section.adjustments.as_ref(),
    )?)
}

/// Run the blend command
pub fn run(
    book: Option<&Path>,
    weights: &str,
    horizon_months: Option<u32>,
    scenarios: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let weights = parse_weights(weights)?;
    let book = Book::load(book)?;
    super::print_json(&report(&book, &weights, horizon_months, scenarios, seed)?)
}
