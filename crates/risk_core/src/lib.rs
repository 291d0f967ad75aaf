//! # risk_core: Foundation layer for the book risk engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! `risk_core` is the bottom layer of the workspace and provides:
//! - Standard normal density and distribution functions (`math::distributions`)
//! - Calendar dates supplied by the caller, never read from a clock (`types::time`)
//! - Error types for date construction and parsing (`types::error`)
//!
//! Layer 1 has no dependency on the other `risk_*` crates.
//!
//! ## Usage Examples
//!
//! ```rust
//! use risk_core::math::distributions::norm_cdf;
//! use risk_core::types::Date;
//!
//! let as_of = Date::from_ymd(2025, 1, 2).unwrap();
//! let expiry = Date::from_ymd(2025, 3, 21).unwrap();
//! assert_eq!(expiry.days_since(as_of), 78);
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for [`types::Date`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
