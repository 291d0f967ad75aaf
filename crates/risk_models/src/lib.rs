//! # risk_models (L2: Business Logic)
//!
//! Positions, option sensitivities and portfolio aggregation.
//!
//! This crate provides:
//! - Black-Scholes greeks scaled for P&L use (`analytical`)
//! - Share and option positions with a bounded Taylor-series P&L
//!   estimator (`instruments`)
//! - OCC contract symbol parsing (`instruments::occ`)
//! - Portfolio NAV, dollar exposures and fan-out P&L (`portfolio`)
//! - An example tail-hedge book (`demo`)
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** for static dispatch
//! - **Caller-supplied valuation dates**: nothing reads the system clock
//! - **Degenerate inputs give zeros, not errors**: errors are raised only
//!   while constructing positions and portfolios
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for positions, greeks and summaries

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod demo;
pub mod instruments;
pub mod portfolio;
