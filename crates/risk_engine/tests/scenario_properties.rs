//! Properties every scenario run must satisfy.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use proptest::prelude::*;
use risk_core::types::Date;
use risk_engine::config::{MAX_SCENARIO_IV, MIN_SCENARIO_IV};
use risk_engine::{
    MarketRegime, ParallelConfig, RiskAnalyzer, ScenarioAssumptions, ScenarioGenerator,
    ScenarioResult, SimulationConfig,
};
use risk_models::demo::tail_hedge_book;
use risk_models::instruments::Position;
use risk_models::portfolio::{Portfolio, UnderlyingQuote};

fn as_of() -> Date {
    Date::from_ymd(2024, 12, 21).unwrap()
}

fn config(n: usize, seed: u64) -> SimulationConfig {
    SimulationConfig::builder()
        .n_scenarios(n)
        .seed(seed)
        .build()
        .unwrap()
}

#[test]
fn test_long_put_loss_never_exceeds_premium() {
    let put = Position::from_occ("SPY", "SPY250321P00580000", 1.0, 14.0, 585.0, 0.20).unwrap();
    let mut book = Portfolio::new(vec![put], 0.0);
    let quotes = BTreeMap::from([("SPY".to_string(), UnderlyingQuote::new(585.0, 0.20))]);
    book.compute_greeks(&quotes, as_of(), 0.045);
    let notional = book.positions()[0].notional();

    let assumptions = ScenarioAssumptions::for_regime(MarketRegime::RiskOff, 12);
    let cfg = config(100_000, 17);
    let results = ScenarioGenerator::new(&book, &assumptions, &cfg)
        .unwrap()
        .generate();

    assert_eq!(results.len(), 100_000);
    for r in &results {
        assert!(r.total_pnl >= -notional - 1e-9, "scenario {}: {}", r.index, r.total_pnl);
        assert!(r.total_pnl <= 10.0 * notional + 1e-9);
    }
}

#[test]
fn test_scenario_iv_stays_in_range() {
    let book = tail_hedge_book(as_of()).unwrap();
    let assumptions = ScenarioAssumptions::for_regime(MarketRegime::RiskOff, 24);
    let cfg = config(20_000, 3);
    let generator = ScenarioGenerator::new(&book, &assumptions, &cfg).unwrap();

    for r in generator.generate() {
        for (underlying, change) in &r.iv_changes {
            let current = generator.current_iv(underlying).unwrap();
            let level = current + change / 100.0;
            assert!(
                (MIN_SCENARIO_IV - 1e-9..=MAX_SCENARIO_IV + 1e-9).contains(&level),
                "{underlying}: {level}"
            );
        }
    }
}

#[test]
fn test_results_independent_of_thread_count() {
    let book = tail_hedge_book(as_of()).unwrap();
    let assumptions = ScenarioAssumptions::for_regime(MarketRegime::CreditStress, 6);
    let cfg = SimulationConfig::builder()
        .n_scenarios(2_000)
        .seed(99)
        .parallel(ParallelConfig::new(16, 0))
        .build()
        .unwrap();
    let generator = ScenarioGenerator::new(&book, &assumptions, &cfg).unwrap();

    let run_on = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| generator.generate())
    };

    let single = run_on(1);
    assert_eq!(single, run_on(4));
    assert_eq!(single, run_on(7));
}

#[test]
fn test_seed_changes_outcomes() {
    let book = tail_hedge_book(as_of()).unwrap();
    let assumptions = ScenarioAssumptions::for_regime(MarketRegime::Neutral, 6);
    let a_cfg = config(200, 1);
    let b_cfg = config(200, 2);
    let a = ScenarioGenerator::new(&book, &assumptions, &a_cfg).unwrap().generate();
    let b = ScenarioGenerator::new(&book, &assumptions, &b_cfg).unwrap().generate();
    assert_ne!(a, b);
}

#[test]
fn test_empty_portfolio_runs() {
    let book = Portfolio::new(Vec::new(), 25_000.0);
    let assumptions = ScenarioAssumptions::for_regime(MarketRegime::RiskOff, 6);
    let cfg = config(500, 8);
    let results = ScenarioGenerator::new(&book, &assumptions, &cfg)
        .unwrap()
        .generate();

    assert_eq!(results.len(), 500);
    assert!(results.iter().all(|r| r.total_pnl == 0.0 && r.returns.is_empty()));
    assert!(results.iter().all(|r| !r.had_jump && r.top_contributor.is_none()));

    let summary = RiskAnalyzer::new().analyze(&results);
    assert_eq!(summary.std_pnl_pct, 0.0);
    assert_eq!(summary.skewness, 0.0);
    assert_eq!(summary.var_95_pct, 0.0);
    assert!(summary.cvar_attribution.is_empty());
}

#[test]
fn test_non_positive_nav_gives_zero_percentages() {
    let short = Position::share("SPY", -20.0, 585.0).unwrap();
    let book = Portfolio::new(vec![short], -50_000.0);
    let assumptions = ScenarioAssumptions::for_regime(MarketRegime::RiskOff, 6);
    let cfg = config(200, 4);
    let results = ScenarioGenerator::new(&book, &assumptions, &cfg)
        .unwrap()
        .generate();
    assert!(results.iter().all(|r| r.total_pnl_pct == 0.0));
    assert!(results.iter().any(|r| r.total_pnl != 0.0));
}

#[test]
fn test_attribution_sums_to_hundred() {
    let book = tail_hedge_book(as_of()).unwrap();
    let assumptions = ScenarioAssumptions::for_regime(MarketRegime::RiskOff, 6);
    let cfg = config(5_000, 21);
    let results = ScenarioGenerator::new(&book, &assumptions, &cfg)
        .unwrap()
        .generate();
    let summary = RiskAnalyzer::new().analyze(&results);

    let total: f64 = summary.cvar_attribution.iter().map(|e| e.pct).sum();
    assert_relative_eq!(total, 100.0, epsilon = 1e-6);
    assert_eq!(summary.cvar_attribution.len(), book.len());
    let pnls: Vec<f64> = summary.cvar_attribution.iter().map(|e| e.pnl).collect();
    assert!(pnls.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_summary_is_consistent_with_results() {
    let book = tail_hedge_book(as_of()).unwrap();
    let assumptions = ScenarioAssumptions::for_regime(MarketRegime::Stagflation, 12);
    let cfg = config(3_000, 5);
    let results = ScenarioGenerator::new(&book, &assumptions, &cfg)
        .unwrap()
        .generate();
    let summary = RiskAnalyzer::new().analyze(&results);

    assert_eq!(summary.n_scenarios, 3_000);
    assert!(summary.max_loss_pct <= summary.var_99_pct);
    assert!(summary.var_99_pct <= summary.var_95_pct);
    assert!(summary.var_95_pct <= summary.median_pnl_pct);
    assert!(summary.median_pnl_pct <= summary.max_gain_pct);
    assert!(summary.prob_loss_gt_20pct <= summary.prob_loss_gt_10pct);
    assert_eq!(summary.top_3_losers[0].pnl_pct, summary.max_loss_pct);
    assert_eq!(summary.top_3_winners[0].pnl_pct, summary.max_gain_pct);
}

fn plain_results(pnls: &[f64]) -> Vec<ScenarioResult> {
    pnls.iter()
        .enumerate()
        .map(|(index, &p)| ScenarioResult {
            index,
            total_pnl_pct: p,
            ..Default::default()
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_var_ordering(pnls in prop::collection::vec(-1.0f64..1.0, 1..300)) {
        let summary = RiskAnalyzer::new().analyze(&plain_results(&pnls));
        prop_assert!(summary.var_99_pct <= summary.var_95_pct + 1e-12);
        prop_assert!(summary.cvar_95_pct <= summary.var_95_pct + 1e-12);
        prop_assert!(summary.max_loss_pct <= summary.var_99_pct + 1e-12);
        prop_assert!(summary.std_pnl_pct >= 0.0);
        prop_assert!((0.0..=1.0).contains(&summary.prob_positive));
    }
}
