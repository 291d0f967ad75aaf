//! Book file configuration.
//!
//! A book file is TOML describing the valuation date, cash, quotes and
//! positions, plus an optional `[simulation]` table. Environment variables
//! `RISK_SCENARIOS`, `RISK_SEED` and `RISK_LOG_LEVEL` override the file
//! after loading.

use std::collections::BTreeMap;
use std::path::Path;

use risk_core::types::Date;
use risk_engine::config::{MAX_SCENARIOS, MAX_SCENARIO_IV, MIN_SCENARIO_IV};
use risk_engine::{IvAnchor, MarketRegime, RegimeAdjustments};
use risk_models::instruments::{
    OccSymbol, OptionContract, OptionRight, Position, DEFAULT_RISK_FREE_RATE,
};
use risk_models::portfolio::{Portfolio, UnderlyingQuote};
use serde::Deserialize;

use crate::{CliError, Result};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Quote for one underlying.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QuoteEntry {
    /// Underlying symbol
    pub symbol: String,
    /// Current price
    pub price: f64,
    /// Current implied volatility (fraction)
    pub implied_vol: f64,
}

/// One position line.
///
/// An option is given either by `occ` or by `right`, `strike` and `expiry`;
/// anything else is a share position.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PositionEntry {
    /// Underlying symbol
    pub underlying: String,
    /// Signed quantity (contracts for options)
    pub quantity: f64,
    /// Entry price (premium per share for options)
    pub entry_price: f64,
    /// Full OCC symbol
    pub occ: Option<String>,
    /// Option right
    pub right: Option<OptionRight>,
    /// Option strike
    pub strike: Option<f64>,
    /// Option expiry (YYYY-MM-DD)
    pub expiry: Option<String>,
    /// Underlying price at entry; defaults to the quote
    pub entry_underlying_price: Option<f64>,
    /// Implied volatility at entry; defaults to the quote
    pub entry_iv: Option<f64>,
}

impl PositionEntry {
    fn is_option(&self) -> bool {
        self.occ.is_some() || self.right.is_some()
    }
}

/// `[simulation]` table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSection {
    /// Number of scenarios
    pub scenarios: usize,
    /// Base seed; the engine default when absent
    pub seed: Option<u64>,
    /// Horizon in months
    pub horizon_months: u32,
    /// Regime label
    pub regime: String,
    /// Fixed IV anchor; entry IV per underlying when absent
    pub fixed_iv: Option<f64>,
    /// Log level
    pub log_level: String,
    /// Adjustments applied on top of every regime
    pub adjustments: Option<RegimeAdjustments>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            scenarios: 10_000,
            seed: None,
            horizon_months: 6,
            regime: MarketRegime::Neutral.name().to_string(),
            fixed_iv: None,
            log_level: "info".to_string(),
            adjustments: None,
        }
    }
}

impl SimulationSection {
    /// IV anchor selected by `fixed_iv`.
    pub fn iv_anchor(&self) -> IvAnchor {
        self.fixed_iv.map_or(IvAnchor::EntryIv, IvAnchor::Fixed)
    }
}

/// Book file contents.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BookConfig {
    /// Valuation date (YYYY-MM-DD); today when absent
    pub as_of: Option<String>,
    /// Cash balance
    #[serde(default)]
    pub cash: f64,
    /// Risk-free rate
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Underlying quotes
    #[serde(default)]
    pub quotes: Vec<QuoteEntry>,
    /// Positions
    #[serde(default)]
    pub positions: Vec<PositionEntry>,
    /// Simulation settings
    #[serde(default)]
    pub simulation: SimulationSection,
}

fn default_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            as_of: None,
            cash: 0.0,
            rate: default_rate(),
            quotes: Vec::new(),
            positions: Vec::new(),
            simulation: SimulationSection::default(),
        }
    }
}

impl BookConfig {
    /// Loads a book from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses a book from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads, applies environment overrides and validates.
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self> {
        let config = Self::load(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Applies `RISK_*` environment overrides.
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; unparsable numbers are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(n) = lookup("RISK_SCENARIOS").and_then(|v| v.trim().parse().ok()) {
            self.simulation.scenarios = n;
        }
        if let Some(seed) = lookup("RISK_SEED").and_then(|v| v.trim().parse().ok()) {
            self.simulation.seed = Some(seed);
        }
        if let Some(level) = lookup("RISK_LOG_LEVEL") {
            self.simulation.log_level = level;
        }
        self
    }

    /// Valuation date: `as_of`, or today.
    pub fn valuation_date(&self) -> Result<Date> {
        match &self.as_of {
            Some(s) => Ok(Date::parse(s)?),
            None => Ok(Date::from(chrono::Local::now().date_naive())),
        }
    }

    /// Validates the whole book, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.simulation.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.simulation.log_level, VALID_LOG_LEVELS
            ));
        }
        if self.simulation.scenarios == 0 || self.simulation.scenarios > MAX_SCENARIOS {
            errors.push(format!(
                "scenarios {} must be within 1..={MAX_SCENARIOS}",
                self.simulation.scenarios
            ));
        }
        if self.simulation.horizon_months == 0 {
            errors.push("horizon_months must be at least 1".to_string());
        }
        if MarketRegime::lookup(&self.simulation.regime).is_none() {
            errors.push(format!("Unknown regime '{}'", self.simulation.regime));
        }
        if let Some(iv) = self.simulation.fixed_iv {
            if !(MIN_SCENARIO_IV..=MAX_SCENARIO_IV).contains(&iv) {
                errors.push(format!(
                    "fixed_iv {iv} must be within [{MIN_SCENARIO_IV}, {MAX_SCENARIO_IV}]"
                ));
            }
        }
        if !self.cash.is_finite() {
            errors.push("cash must be finite".to_string());
        }
        if !self.rate.is_finite() {
            errors.push("rate must be finite".to_string());
        }
        if let Some(s) = &self.as_of {
            if Date::parse(s).is_err() {
                errors.push(format!("as_of '{s}' is not a YYYY-MM-DD date"));
            }
        }

        for quote in &self.quotes {
            if !(quote.price > 0.0) || !(quote.implied_vol > 0.0) {
                errors.push(format!(
                    "quote {}: price and implied_vol must be positive",
                    quote.symbol
                ));
            }
        }

        let quotes = self.quote_map();
        for (i, entry) in self.positions.iter().enumerate() {
            let label = format!("position {} ({})", i + 1, entry.underlying);
            if !entry.is_option() {
                continue;
            }
            if entry.occ.is_none() && (entry.strike.is_none() || entry.expiry.is_none()) {
                errors.push(format!("{label}: option needs `occ` or `strike` and `expiry`"));
            }
            if let Some(expiry) = &entry.expiry {
                if Date::parse(expiry).is_err() {
                    errors.push(format!("{label}: expiry '{expiry}' is not a YYYY-MM-DD date"));
                }
            }
            let quote = quotes.get(entry.underlying.as_str());
            if entry.entry_underlying_price.is_none() && quote.is_none() {
                errors.push(format!("{label}: no entry_underlying_price and no quote"));
            }
            if entry.entry_iv.is_none() && quote.is_none() {
                errors.push(format!("{label}: no entry_iv and no quote"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CliError::Validation(errors))
        }
    }

    /// Quotes keyed by symbol.
    pub fn quote_map(&self) -> BTreeMap<String, UnderlyingQuote> {
        self.quotes
            .iter()
            .map(|q| (q.symbol.clone(), UnderlyingQuote::new(q.price, q.implied_vol)))
            .collect()
    }

    /// Builds the portfolio and values its greeks against the quotes.
    pub fn to_portfolio(&self) -> Result<Portfolio> {
        let as_of = self.valuation_date()?;
        let quotes = self.quote_map();

        let positions = self
            .positions
            .iter()
            .map(|entry| build_position(entry, quotes.get(entry.underlying.as_str())))
            .collect::<Result<Vec<_>>>()?;

        let mut portfolio = Portfolio::builder()
            .add_positions(positions)
            .with_cash(self.cash)
            .build()?;
        portfolio.compute_greeks(&quotes, as_of, self.rate);
        Ok(portfolio)
    }
}

fn build_position(entry: &PositionEntry, quote: Option<&UnderlyingQuote>) -> Result<Position> {
    if !entry.is_option() {
        return Ok(Position::share(
            entry.underlying.as_str(),
            entry.quantity,
            entry.entry_price,
        )?);
    }

    let missing = |field: &str| {
        CliError::InvalidArgument(format!("{}: missing {field}", entry.underlying))
    };
    let underlying_price = entry
        .entry_underlying_price
        .or(quote.map(|q| q.price))
        .ok_or_else(|| missing("entry_underlying_price"))?;
    let entry_iv = entry
        .entry_iv
        .or(quote.map(|q| q.implied_vol))
        .ok_or_else(|| missing("entry_iv"))?;

    if let Some(occ) = &entry.occ {
        return Ok(Position::from_occ(
            &entry.underlying,
            occ,
            entry.quantity,
            entry.entry_price,
            underlying_price,
            entry_iv,
        )?);
    }

    let right = entry.right.ok_or_else(|| missing("right"))?;
    let strike = entry.strike.ok_or_else(|| missing("strike"))?;
    let expiry = Date::parse(entry.expiry.as_deref().ok_or_else(|| missing("expiry"))?)?;
    let code = OccSymbol::new(&entry.underlying, expiry, right, strike)?.contract_code();
    let contract = OptionContract::new(right, strike, expiry, entry_iv)?;
    Ok(Position::option(
        &entry.underlying,
        &code,
        contract,
        entry.quantity,
        entry.entry_price,
        underlying_price,
    )?)
}
