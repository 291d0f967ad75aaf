//! CLI error types.

use risk_core::types::DateError;
use risk_engine::ConfigError;
use risk_models::instruments::InstrumentError;
use risk_models::portfolio::PortfolioError;
use thiserror::Error;

/// Errors surfaced by the `risk` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Book file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Failed to read a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Book file is not valid TOML for the expected layout.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Book file parsed but has invalid values.
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid date.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid position.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Invalid portfolio.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Invalid simulation configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to serialise output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = CliError::Validation(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Validation errors: a; b");
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err = CliError::from(ConfigError::InvalidHorizon(0));
        assert_eq!(err.to_string(), "Invalid horizon: 0 months (must be at least 1)");
    }

    #[test]
    fn test_file_not_found_display() {
        let err = CliError::FileNotFound("book.toml".to_string());
        assert_eq!(err.to_string(), "File not found: book.toml");
    }
}
