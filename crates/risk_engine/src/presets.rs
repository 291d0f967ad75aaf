//! Regime-conditioned scenario assumptions.
//!
//! Each [`MarketRegime`] maps to a fixed bundle of stochastic parameters.
//! [`ScenarioAssumptions::for_regime`] combines that bundle with a horizon;
//! the result is immutable once returned.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Days credited per simulated month.
pub const DAYS_PER_MONTH: u32 = 30;

/// Types of market regime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MarketRegime {
    /// Rising inflation with slowing growth
    Stagflation,
    /// Disinflationary growth
    Goldilocks,
    /// Broad de-risking with volatility spike
    RiskOff,
    /// Term premium repricing
    RatesShock,
    /// Spread widening and defaults
    CreditStress,
    /// Slow grind lower
    SlowBleed,
    /// Low realised and implied volatility
    VolCrush,
    /// No regime view
    #[default]
    Neutral,
}

impl MarketRegime {
    /// Every regime, in table order.
    pub const ALL: [MarketRegime; 8] = [
        Self::Stagflation,
        Self::Goldilocks,
        Self::RiskOff,
        Self::RatesShock,
        Self::CreditStress,
        Self::SlowBleed,
        Self::VolCrush,
        Self::Neutral,
    ];

    /// Canonical label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stagflation => "stagflation",
            Self::Goldilocks => "goldilocks",
            Self::RiskOff => "risk_off",
            Self::RatesShock => "rates_shock",
            Self::CreditStress => "credit_stress",
            Self::SlowBleed => "slow_bleed",
            Self::VolCrush => "vol_crush",
            Self::Neutral => "neutral",
        }
    }

    /// Every label that resolves to this regime.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Stagflation => &["stagflation", "inflationary"],
            Self::Goldilocks => &["goldilocks", "disinflationary"],
            Self::RiskOff => &["risk_off", "crash"],
            Self::RatesShock => &["rates_shock", "term_premium"],
            Self::CreditStress => &["credit_stress", "credit_event"],
            Self::SlowBleed => &["slow_bleed", "grinding_down"],
            Self::VolCrush => &["vol_crush", "complacent"],
            Self::Neutral => &["all", "neutral", "default"],
        }
    }

    /// Short description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Stagflation => "Negative real drift, elevated vol, sticky high IV",
            Self::Goldilocks => "Positive drift, low vol, fast IV mean reversion",
            Self::RiskOff => "Sharp drawdown, very high vol, frequent large jumps",
            Self::RatesShock => "Duration-led selloff with moderate vol",
            Self::CreditStress => "Spread-led selloff, strong spot/vol correlation",
            Self::SlowBleed => "Persistent mild decline, subdued vol",
            Self::VolCrush => "Rally with collapsing implied volatility",
            Self::Neutral => "Long-run average market behaviour",
        }
    }

    /// Strict label lookup: case-insensitive, `-` and `_` equivalent.
    ///
    /// ```
    /// use risk_engine::MarketRegime;
    ///
    /// assert_eq!(MarketRegime::lookup("Risk-Off"), Some(MarketRegime::RiskOff));
    /// assert_eq!(MarketRegime::lookup("crash"), Some(MarketRegime::RiskOff));
    /// assert_eq!(MarketRegime::lookup("euphoria"), None);
    /// ```
    pub fn lookup(label: &str) -> Option<Self> {
        let key = label.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|regime| regime.aliases().contains(&key.as_str()))
    }

    /// Lenient label lookup: unknown labels resolve to [`MarketRegime::Neutral`].
    pub fn from_label(label: &str) -> Self {
        Self::lookup(label).unwrap_or_default()
    }

    /// Stochastic parameters for this regime.
    pub fn parameters(&self) -> RegimeParameters {
        let (drift, vol, mr, vov, iv_mean, rho, jump_p, jump_size, jump_iv) = match self {
            Self::Stagflation => (-0.02, 0.22, 0.5, 0.80, 0.25, -0.65, 0.10, -0.15, 10.0),
            Self::Goldilocks => (0.08, 0.15, 1.0, 0.50, 0.18, -0.50, 0.03, -0.10, 5.0),
            Self::RiskOff => (-0.25, 0.35, 0.2, 1.20, 0.40, -0.80, 0.25, -0.20, 15.0),
            Self::RatesShock => (-0.10, 0.24, 0.6, 0.70, 0.22, -0.55, 0.08, -0.12, 8.0),
            Self::CreditStress => (-0.15, 0.28, 0.4, 0.90, 0.30, -0.75, 0.15, -0.18, 12.0),
            Self::SlowBleed => (-0.08, 0.16, 0.9, 0.45, 0.19, -0.40, 0.02, -0.08, 4.0),
            Self::VolCrush => (0.10, 0.12, 1.5, 0.35, 0.14, -0.35, 0.01, -0.06, 3.0),
            Self::Neutral => (0.05, 0.18, 0.75, 0.65, 0.20, -0.60, 0.05, -0.12, 7.5),
        };
        RegimeParameters {
            equity_drift: drift,
            equity_vol: vol,
            iv_mean_reversion_speed: mr,
            iv_vol_of_vol: vov,
            iv_long_run_mean: iv_mean,
            spot_vol_correlation: rho,
            jump_probability: jump_p,
            jump_size_mean: jump_size,
            jump_iv_spike: jump_iv,
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MarketRegime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| ConfigError::InvalidParameter {
            name: "regime",
            value: format!("unknown regime label '{s}'"),
        })
    }
}

/// Annualised stochastic parameters of one regime.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegimeParameters {
    /// Annual expected underlying return
    pub equity_drift: f64,
    /// Annual underlying volatility
    pub equity_vol: f64,
    /// IV mean-reversion speed
    pub iv_mean_reversion_speed: f64,
    /// Volatility of implied volatility
    pub iv_vol_of_vol: f64,
    /// Long-run IV level (fraction)
    pub iv_long_run_mean: f64,
    /// Correlation between return and IV shocks
    pub spot_vol_correlation: f64,
    /// Probability of a jump per underlying per scenario
    pub jump_probability: f64,
    /// Mean jump return (fraction)
    pub jump_size_mean: f64,
    /// IV spike on a jump (vol points)
    pub jump_iv_spike: f64,
}

/// Multiplicative and additive tweaks applied on top of a regime preset.
///
/// The default is the identity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct RegimeAdjustments {
    /// Added to the drift
    pub equity_drift_adj: f64,
    /// Multiplies the underlying volatility
    pub equity_vol_mult: f64,
    /// Multiplies the vol-of-vol
    pub iv_vol_mult: f64,
    /// Added to the long-run IV mean
    pub iv_level_adj: f64,
    /// Multiplies the jump probability
    pub jump_prob_mult: f64,
    /// Multiplies jump size and jump IV spike
    pub jump_size_mult: f64,
}

impl Default for RegimeAdjustments {
    fn default() -> Self {
        Self {
            equity_drift_adj: 0.0,
            equity_vol_mult: 1.0,
            iv_vol_mult: 1.0,
            iv_level_adj: 0.0,
            jump_prob_mult: 1.0,
            jump_size_mult: 1.0,
        }
    }
}

impl RegimeAdjustments {
    /// Applies the adjustments to a parameter set.
    pub fn apply(&self, base: &RegimeParameters) -> RegimeParameters {
        RegimeParameters {
            equity_drift: base.equity_drift + self.equity_drift_adj,
            equity_vol: base.equity_vol * self.equity_vol_mult,
            iv_vol_of_vol: base.iv_vol_of_vol * self.iv_vol_mult,
            iv_long_run_mean: base.iv_long_run_mean + self.iv_level_adj,
            jump_probability: (base.jump_probability * self.jump_prob_mult).clamp(0.0, 1.0),
            jump_size_mean: base.jump_size_mean * self.jump_size_mult,
            jump_iv_spike: base.jump_iv_spike * self.jump_size_mult,
            ..*base
        }
    }
}

/// Parameters for one simulation run: a regime's dynamics over a horizon.
///
/// # Examples
///
/// ```
/// use risk_engine::{MarketRegime, ScenarioAssumptions};
///
/// let a = ScenarioAssumptions::for_regime(MarketRegime::RiskOff, 6);
/// assert_eq!(a.label(), "risk_off");
/// assert_eq!(a.horizon_months(), 6);
/// assert_eq!(a.elapsed_days(), 180);
/// assert_eq!(a.horizon_years(), 0.5);
/// assert_eq!(a.parameters().jump_probability, 0.25);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioAssumptions {
    label: String,
    regime: MarketRegime,
    horizon_months: u32,
    parameters: RegimeParameters,
}

impl ScenarioAssumptions {
    /// Preset for `regime` over `horizon_months`.
    pub fn for_regime(regime: MarketRegime, horizon_months: u32) -> Self {
        Self {
            label: regime.name().to_string(),
            regime,
            horizon_months,
            parameters: regime.parameters(),
        }
    }

    /// Preset resolved from a free-form label; unknown labels give Neutral.
    pub fn from_label(label: &str, horizon_months: u32) -> Self {
        Self::for_regime(MarketRegime::from_label(label), horizon_months)
    }

    /// Returns a new set of assumptions with `adjustments` applied.
    pub fn with_adjustments(&self, adjustments: &RegimeAdjustments, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            regime: self.regime,
            horizon_months: self.horizon_months,
            parameters: adjustments.apply(&self.parameters),
        }
    }

    /// Display label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Underlying regime.
    #[inline]
    pub fn regime(&self) -> MarketRegime {
        self.regime
    }

    /// Horizon in months.
    #[inline]
    pub fn horizon_months(&self) -> u32 {
        self.horizon_months
    }

    /// Horizon in years (`months / 12`).
    #[inline]
    pub fn horizon_years(&self) -> f64 {
        f64::from(self.horizon_months) / 12.0
    }

    /// Calendar days of theta decay credited over the horizon.
    #[inline]
    pub fn elapsed_days(&self) -> u32 {
        self.horizon_months.saturating_mul(DAYS_PER_MONTH)
    }

    /// Stochastic parameters.
    #[inline]
    pub fn parameters(&self) -> &RegimeParameters {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_every_alias_resolves() {
        for regime in MarketRegime::ALL {
            for alias in regime.aliases() {
                assert_eq!(MarketRegime::lookup(alias), Some(regime), "{alias}");
            }
            assert_eq!(MarketRegime::lookup(regime.name()), Some(regime));
        }
    }

    #[test]
    fn test_label_normalisation() {
        assert_eq!(MarketRegime::from_label("CREDIT-EVENT"), MarketRegime::CreditStress);
        assert_eq!(MarketRegime::from_label(" Vol_Crush "), MarketRegime::VolCrush);
        assert_eq!(MarketRegime::from_label("All"), MarketRegime::Neutral);
    }

    #[test]
    fn test_unknown_label_is_neutral() {
        assert_eq!(MarketRegime::from_label("euphoria"), MarketRegime::Neutral);
        assert_eq!(MarketRegime::from_label(""), MarketRegime::Neutral);
        assert!("euphoria".parse::<MarketRegime>().is_err());
    }

    #[test]
    fn test_table_values() {
        let p = MarketRegime::Stagflation.parameters();
        assert_eq!(p.equity_drift, -0.02);
        assert_eq!(p.iv_long_run_mean, 0.25);
        assert_eq!(p.jump_iv_spike, 10.0);

        let n = MarketRegime::Neutral.parameters();
        assert_eq!(n.iv_mean_reversion_speed, 0.75);
        assert_eq!(n.jump_iv_spike, 7.5);

        let v = MarketRegime::VolCrush.parameters();
        assert_eq!(v.jump_probability, 0.01);
        assert_eq!(v.spot_vol_correlation, -0.35);
    }

    #[test]
    fn test_parameters_are_sane() {
        for regime in MarketRegime::ALL {
            let p = regime.parameters();
            assert!(p.equity_vol > 0.0);
            assert!(p.iv_vol_of_vol > 0.0);
            assert!((-1.0..=1.0).contains(&p.spot_vol_correlation));
            assert!((0.0..=1.0).contains(&p.jump_probability));
            assert!(p.jump_size_mean < 0.0 && p.jump_iv_spike > 0.0);
        }
    }

    #[test]
    fn test_neutral_adjustments_are_identity() {
        let base = ScenarioAssumptions::for_regime(MarketRegime::CreditStress, 12);
        let adjusted = base.with_adjustments(&RegimeAdjustments::default(), "credit_stress");
        assert_eq!(adjusted, base);
    }

    #[test]
    fn test_adjustments_apply() {
        let base = ScenarioAssumptions::for_regime(MarketRegime::Neutral, 6);
        let adj = RegimeAdjustments {
            equity_drift_adj: -0.05,
            equity_vol_mult: 1.5,
            iv_vol_mult: 2.0,
            iv_level_adj: 0.05,
            jump_prob_mult: 30.0,
            jump_size_mult: 2.0,
        };
        let adjusted = base.with_adjustments(&adj, "neutral_stressed");
        let p = adjusted.parameters();
        assert_eq!(adjusted.label(), "neutral_stressed");
        assert_eq!(adjusted.regime(), MarketRegime::Neutral);
        assert_relative_eq!(p.equity_drift, 0.0, epsilon = 1e-15);
        assert_relative_eq!(p.equity_vol, 0.27, epsilon = 1e-12);
        assert_relative_eq!(p.iv_vol_of_vol, 1.3, epsilon = 1e-12);
        assert_relative_eq!(p.iv_long_run_mean, 0.25, epsilon = 1e-12);
        assert_eq!(p.jump_probability, 1.0);
        assert_relative_eq!(p.jump_size_mean, -0.24, epsilon = 1e-12);
        assert_relative_eq!(p.jump_iv_spike, 15.0, epsilon = 1e-12);
        assert_eq!(p.iv_mean_reversion_speed, 0.75);
        assert_eq!(p.spot_vol_correlation, -0.60);
    }

    #[test]
    fn test_horizon_conversions() {
        let a = ScenarioAssumptions::from_label("goldilocks", 3);
        assert_eq!(a.regime(), MarketRegime::Goldilocks);
        assert_eq!(a.elapsed_days(), 90);
        assert_relative_eq!(a.horizon_years(), 0.25);
    }
}
