//! Portfolio error types.

use thiserror::Error;

use crate::instruments::InstrumentError;

/// Errors that can occur while assembling a portfolio.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PortfolioError {
    /// Two positions share one identity.
    #[error("Duplicate position ID: {0}")]
    DuplicatePosition(String),

    /// Non-finite cash balance.
    #[error("Invalid cash balance: {0}")]
    InvalidCash(f64),

    /// A position failed validation.
    #[error("Invalid position: {0}")]
    Instrument(#[from] InstrumentError),
}
