//! Black-Scholes sensitivities for European options.
//!
//! Only the greeks are needed downstream: the risk engine revalues positions
//! with a Taylor expansion, never with a full reprice.
//!
//! ## Mathematical Formulas
//!
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//! - Delta: N(d₁) for calls, N(d₁) - 1 for puts
//! - Gamma: φ(d₁) / (S·σ·√T)
//! - Vega: S·√T·φ(d₁)
//! - Theta: -(S·σ·φ(d₁))/(2√T) ∓ r·K·e^(-rT)·N(±d₂)

use num_traits::Float;
use risk_core::math::{norm_cdf, norm_pdf};
use risk_core::types::DAYS_PER_YEAR;

use super::error::AnalyticalError;
use crate::instruments::OptionRight;

/// Vol points per unit of volatility.
const VOL_POINTS: f64 = 100.0;

/// Converts an `f64` constant into `T`.
#[inline]
fn lit<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::zero)
}

/// Option sensitivities in the units the P&L approximation consumes.
///
/// - `delta`: per 1.0 change in the underlying
/// - `gamma`: per 1.0 change in the underlying, squared
/// - `vega`: per 1 point (0.01) of implied volatility
/// - `theta`: per calendar day
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T: Float> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂σ per vol point
    pub vega: T,
    /// ∂V/∂t per calendar day
    pub theta: T,
}

impl<T: Float> Greeks<T> {
    /// All four sensitivities set to zero.
    #[inline]
    pub fn zero() -> Self {
        Self {
            delta: T::zero(),
            gamma: T::zero(),
            vega: T::zero(),
            theta: T::zero(),
        }
    }

    /// Returns `true` when every sensitivity is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.vega.is_finite()
            && self.theta.is_finite()
    }

    /// Returns `true` when every sensitivity is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.delta.is_zero() && self.gamma.is_zero() && self.vega.is_zero() && self.theta.is_zero()
    }
}

impl<T: Float> Default for Greeks<T> {
    fn default() -> Self {
        Self::zero()
    }
}

/// Black-Scholes model for European option sensitivities.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use risk_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
///
/// // Put delta = call delta - 1
/// let call = bs.delta(100.0, 1.0, true);
/// let put = bs.delta(100.0, 1.0, false);
/// assert!((call - put - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use risk_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(585.0_f64, 0.045, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !(spot > zero) || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility > zero) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// `expiry` is in years and must be positive; callers guard expiry first.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = lit::<T>(0.5);
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Delta: N(d₁) for calls, N(d₁) - 1 for puts.
    #[inline]
    pub fn delta(&self, strike: T, expiry: T, is_call: bool) -> T {
        let n_d1 = norm_cdf(self.d1(strike, expiry));
        if is_call {
            n_d1
        } else {
            n_d1 - T::one()
        }
    }

    /// Gamma = φ(d₁) / (S·σ·√T), identical for calls and puts.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        let d1 = self.d1(strike, expiry);
        norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Vega = S·√T·φ(d₁) per unit of volatility.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        let d1 = self.d1(strike, expiry);
        self.spot * expiry.sqrt() * norm_pdf(d1)
    }

    /// Annualised theta (∂V/∂t), usually negative.
    #[inline]
    pub fn theta(&self, strike: T, expiry: T, is_call: bool) -> T {
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let discount = (-self.rate * expiry).exp();
        let decay = -(self.spot * self.volatility * norm_pdf(d1)) / (lit::<T>(2.0) * expiry.sqrt());

        if is_call {
            decay - self.rate * strike * discount * norm_cdf(d2)
        } else {
            decay + self.rate * strike * discount * norm_cdf(-d2)
        }
    }

    /// All four sensitivities scaled for P&L use (vega per vol point, theta
    /// per calendar day).
    ///
    /// A non-positive `expiry` yields zero greeks.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike <= 0 or not finite
    /// - `AnalyticalError::NumericalInstability` if any output is not finite
    ///
    /// # Examples
    /// ```
    /// use risk_models::analytical::BlackScholes;
    /// use risk_models::instruments::OptionRight;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.045, 0.2).unwrap();
    /// let greeks = bs.sensitivities(100.0, 0.25, OptionRight::Call).unwrap();
    /// assert!(greeks.delta > 0.5 && greeks.theta < 0.0);
    /// ```
    pub fn sensitivities(
        &self,
        strike: T,
        expiry: T,
        right: OptionRight,
    ) -> Result<Greeks<T>, AnalyticalError> {
        if !(strike > T::zero()) || !strike.is_finite() {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(expiry > T::zero()) {
            return Ok(Greeks::zero());
        }

        let is_call = right.is_call();
        let greeks = Greeks {
            delta: self.delta(strike, expiry, is_call),
            gamma: self.gamma(strike, expiry),
            vega: self.vega(strike, expiry) / lit(VOL_POINTS),
            theta: self.theta(strike, expiry, is_call) / lit(DAYS_PER_YEAR),
        };

        if greeks.is_finite() {
            Ok(greeks)
        } else {
            Err(AnalyticalError::NumericalInstability {
                message: format!(
                    "non-finite greeks for K = {}, T = {}",
                    strike.to_f64().unwrap_or(f64::NAN),
                    expiry.to_f64().unwrap_or(f64::NAN)
                ),
            })
        }
    }
}
