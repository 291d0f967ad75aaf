//! Integration tests for module exports.

#[test]
fn test_root_exports() {
    use risk_engine::{
        AttributionEntry, BlendedSummary, ConfigError, IvAnchor, MarketRegime, ParallelConfig,
        RegimeAdjustments, RegimeBreakdown, RegimeParameters, RiskAnalyzer, RiskSummary,
        ScenarioAssumptions, ScenarioGenerator, ScenarioHighlight, ScenarioResult,
        SimulationConfig, SimulationConfigBuilder, MAX_SCENARIOS,
    };

    assert_eq!(MAX_SCENARIOS, 10_000_000);
    let _: SimulationConfigBuilder = SimulationConfig::builder();
    let _ = IvAnchor::default();
    let _ = ParallelConfig::default();
    let _: RegimeParameters = MarketRegime::Neutral.parameters();
    let _ = ScenarioAssumptions::for_regime(MarketRegime::Neutral, 6)
        .with_adjustments(&RegimeAdjustments::default(), "neutral");
    let _ = RiskAnalyzer::new();
    let _ = RiskSummary::default();
    let _ = ScenarioResult::default();
    let _ = ConfigError::InvalidHorizon(0);
    let _ = ScenarioGenerator::new;
    let _: Option<AttributionEntry> = None;
    let _: Option<ScenarioHighlight> = None;
    let _: Option<BlendedSummary> = None;
    let _: Option<RegimeBreakdown> = None;
}

#[test]
fn test_module_paths() {
    use risk_engine::analysis::{quantile_sorted, value_at_risk, HIGHLIGHT_COUNT};
    use risk_engine::blend::{regime_scenarios, run_blended, MIN_REGIME_SCENARIOS, MIN_REGIME_WEIGHT};
    use risk_engine::config::{DEFAULT_SEED, FALLBACK_IV, MAX_SCENARIO_IV, MIN_SCENARIO_IV};
    use risk_engine::generator::{draw_underlying, UnderlyingDraw, JUMP_IV_STD, JUMP_RETURN_STD};
    use risk_engine::presets::DAYS_PER_MONTH;
    use risk_engine::rng::{derive_seed, ScenarioRng};

    assert_eq!(HIGHLIGHT_COUNT, 3);
    assert_eq!(MIN_REGIME_SCENARIOS, 100);
    assert_eq!(MIN_REGIME_WEIGHT, 0.01);
    assert_eq!(DAYS_PER_MONTH, 30);
    assert_eq!(JUMP_RETURN_STD, 0.05);
    assert_eq!(JUMP_IV_STD, 2.0);
    assert_eq!((MIN_SCENARIO_IV, MAX_SCENARIO_IV, FALLBACK_IV), (0.05, 1.5, 0.2));
    let _ = DEFAULT_SEED;
    let _ = quantile_sorted(&[1.0], 0.5);
    let _ = value_at_risk(&[1.0], 0.95);
    let _ = regime_scenarios(1_000, 0.5);
    let _ = run_blended;
    let _ = derive_seed(1, 2);
    let mut rng = ScenarioRng::from_seed(1);
    let draw: UnderlyingDraw =
        draw_underlying(&mut rng, &risk_engine::MarketRegime::Neutral.parameters(), 0.5, 0.2);
    assert!(draw.ret.is_finite());
}
