//! Closed-form option sensitivities.
//!
//! - Black-Scholes delta, gamma, vega and theta for European calls and puts
//! - Scaling to P&L units (vega per vol point, theta per calendar day)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: `f64` in production, `f32` where memory matters
//! - **Errors at construction**: invalid spot or volatility is rejected by
//!   [`BlackScholes::new`]; the position layer turns any error into zero greeks

pub mod black_scholes;
pub mod error;

pub use black_scholes::{BlackScholes, Greeks};
pub use error::AnalyticalError;
