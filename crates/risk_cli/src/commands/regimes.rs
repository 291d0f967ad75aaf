//! Regimes command implementation
//!
//! Lists every regime preset with its aliases and parameters.

use risk_engine::{MarketRegime, RegimeParameters};
use serde::Serialize;

use crate::Result;

/// One preset.
#[derive(Debug, Serialize)]
pub struct RegimeInfo {
    /// Canonical label
    pub name: &'static str,
    /// Accepted labels
    pub aliases: &'static [&'static str],
    /// Short description
    pub description: &'static str,
    /// Annualised parameters
    pub parameters: RegimeParameters,
}

/// Every preset in table order.
pub fn report() -> Vec<RegimeInfo> {
    MarketRegime::ALL
        .iter()
        .map(|regime| RegimeInfo {
            name: regime.name(),
            aliases: regime.aliases(),
            description: regime.description(),
            parameters: regime.parameters(),
        })
        .collect()
}

/// Run the regimes command
pub fn run() -> Result<()> {
    super::print_json(&report())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_regime() {
        let report = report();
        assert_eq!(report.len(), 8);
        assert_eq!(report[2].name, "risk_off");
        assert_eq!(report[2].parameters.jump_probability, 0.25);
        assert!(report[7].aliases.contains(&"default"));
    }

    #[test]
    fn test_serialises() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json[6]["name"], "vol_crush");
        assert_eq!(json[6]["parameters"]["equity_vol"], 0.12);
    }
}
