//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands build a
//! serialisable report and print it as pretty JSON on stdout.

pub mod blend;
pub mod exposures;
pub mod regimes;
pub mod simulate;

use std::path::Path;

use risk_core::types::Date;
use risk_engine::{IvAnchor, SimulationConfig};
use risk_models::demo::tail_hedge_book;
use risk_models::portfolio::Portfolio;
use serde::Serialize;
use tracing::info;

use crate::config::BookConfig;
use crate::Result;

/// A loaded book: its settings and the valued portfolio.
#[derive(Debug)]
pub struct Book {
    /// File settings (defaults for the built-in demo book)
    pub config: BookConfig,
    /// Valuation date
    pub as_of: Date,
    /// Portfolio with greeks computed at `as_of`
    pub portfolio: Portfolio,
}

impl Book {
    /// Loads `path`, or the built-in tail-hedge book when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let config = BookConfig::load_with_env_and_validate(path)?;
                let as_of = config.valuation_date()?;
                let portfolio = config.to_portfolio()?;
                info!(book = %path.display(), positions = portfolio.len(), "book loaded");
                Ok(Self {
                    config,
                    as_of,
                    portfolio,
                })
            }
            None => {
                let config = BookConfig::default().with_env_override();
                config.validate()?;
                let as_of = config.valuation_date()?;
                let portfolio = tail_hedge_book(as_of)?;
                info!(positions = portfolio.len(), "using built-in tail-hedge book");
                Ok(Self {
                    config,
                    as_of,
                    portfolio,
                })
            }
        }
    }

    /// Engine configuration from the book's `[simulation]` table, with
    /// command-line values taking precedence.
    pub fn simulation_config(
        &self,
        scenarios: Option<usize>,
        seed: Option<u64>,
        iv_anchor: Option<IvAnchor>,
    ) -> Result<SimulationConfig> {
        let section = &self.config.simulation;
        let mut builder = SimulationConfig::builder()
            .n_scenarios(scenarios.unwrap_or(section.scenarios))
            .iv_anchor(iv_anchor.unwrap_or_else(|| section.iv_anchor()));
        if let Some(seed) = seed.or(section.seed) {
            builder = builder.seed(seed);
        }
        Ok(builder.build()?)
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
