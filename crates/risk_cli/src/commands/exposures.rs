//! Exposures command implementation
//!
//! Values the book's greeks and prints per-position and aggregate exposures.

use std::path::Path;

use risk_models::instruments::Position;
use risk_models::portfolio::PortfolioSummary;
use serde::Serialize;
use tracing::info;

use super::Book;
use crate::Result;

/// Exposures of one position.
#[derive(Debug, Serialize, PartialEq)]
pub struct PositionExposure {
    /// Position identity
    pub id: String,
    /// Signed quantity
    pub quantity: f64,
    /// Absolute entry value
    pub notional: f64,
    /// Days to expiry (0 for shares)
    pub days_to_expiry: u32,
    /// Per-unit delta
    pub delta: f64,
    /// Dollar delta
    pub delta_dollars: f64,
    /// Dollar vega per vol point
    pub vega_dollars: f64,
    /// Dollar theta per day
    pub theta_dollars: f64,
    /// Dollar gamma
    pub gamma_dollars: f64,
}

impl From<&Position> for PositionExposure {
    fn from(p: &Position) -> Self {
        Self {
            id: p.id().to_string(),
            quantity: p.quantity(),
            notional: p.notional(),
            days_to_expiry: p.days_to_expiry(),
            delta: p.greeks().delta,
            delta_dollars: p.delta_dollars(),
            vega_dollars: p.vega_dollars(),
            theta_dollars: p.theta_dollars(),
            gamma_dollars: p.gamma_dollars(),
        }
    }
}

/// Output of the exposures command.
#[derive(Debug, Serialize)]
pub struct ExposureReport {
    /// Valuation date
    pub as_of: String,
    /// Per-position exposures in book order
    pub positions: Vec<PositionExposure>,
    /// Aggregate exposures
    pub summary: PortfolioSummary,
}

/// Builds the report for a loaded book.
pub fn report(book: &Book) -> ExposureReport {
    ExposureReport {
        as_of: book.as_of.to_string(),
        positions: book
            .portfolio
            .positions()
            .iter()
            .map(PositionExposure::from)
            .collect(),
        summary: book.portfolio.summary(),
    }
}

/// Run the exposures command
pub fn run(book: Option<&Path>) -> Result<()> {
    let book = Book::load(book)?;
    let report = report(&book);
    info!(
        nav = report.summary.nav,
        net_delta_pct = report.summary.net_delta_pct,
        "exposures computed"
    );
    super::print_json(&report)
}
