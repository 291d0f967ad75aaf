//! # risk_engine (L4: Application)
//!
//! Regime-conditioned Monte Carlo scenarios and tail-risk analytics for a
//! [`risk_models::portfolio::Portfolio`].
//!
//! This crate provides:
//! - Regime presets and adjustments (`presets`)
//! - Per-scenario seeded random streams (`rng`)
//! - Validated run configuration (`config`)
//! - Scenario generation with jumps and correlated IV moves (`generator`)
//! - VaR, CVaR, moments and tail attribution (`analysis`)
//! - Regime-weighted blended runs (`blend`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            risk_engine (L4)             │
//! ├─────────────────────────────────────────┤
//! │  presets/   - MarketRegime, assumptions │
//! │  generator/ - scenario draws + P&L      │
//! │  analysis/  - RiskSummary, attribution  │
//! │  blend/     - regime-weighted runs      │
//! │  parallel/  - Rayon scheduling          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            risk_models (L2)             │
//! │  Positions, greeks, portfolio P&L       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Scenario `i` of a run seeded with `s` always draws from the same stream,
//! so a run gives identical results on any number of threads.
//!
//! ## Example
//!
//! ```
//! use risk_core::types::Date;
//! use risk_engine::{
//!     MarketRegime, RiskAnalyzer, ScenarioAssumptions, ScenarioGenerator, SimulationConfig,
//! };
//! use risk_models::demo::tail_hedge_book;
//!
//! let book = tail_hedge_book(Date::from_ymd(2024, 12, 21).unwrap()).unwrap();
//! let assumptions = ScenarioAssumptions::for_regime(MarketRegime::CreditStress, 6);
//! let config = SimulationConfig::builder().n_scenarios(1_000).seed(7).build().unwrap();
//!
//! let results = ScenarioGenerator::new(&book, &assumptions, &config)
//!     .unwrap()
//!     .generate();
//! let summary = RiskAnalyzer::new().analyze(&results);
//!
//! assert_eq!(summary.n_scenarios, 1_000);
//! assert!(summary.var_99_pct <= summary.var_95_pct);
//! assert!(summary.cvar_95_pct <= summary.var_95_pct);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analysis;
pub mod blend;
pub mod config;
pub mod error;
pub mod generator;
pub mod parallel;
pub mod presets;
pub mod result;
pub mod rng;

pub use analysis::{AttributionEntry, RiskAnalyzer, RiskSummary, ScenarioHighlight};
pub use blend::{run_blended, BlendedSummary, RegimeBreakdown};
pub use config::{IvAnchor, SimulationConfig, SimulationConfigBuilder, MAX_SCENARIOS};
pub use error::ConfigError;
pub use generator::ScenarioGenerator;
pub use parallel::ParallelConfig;
pub use presets::{MarketRegime, RegimeAdjustments, RegimeParameters, ScenarioAssumptions};
pub use result::ScenarioResult;
