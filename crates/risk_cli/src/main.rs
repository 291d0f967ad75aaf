//! Book risk CLI
//!
//! Operational entry point for the scenario risk engine.
//!
//! # Commands
//!
//! - `risk regimes` - List the regime presets
//! - `risk exposures [--book <file>]` - Greeks and dollar exposures
//! - `risk simulate [--book <file>] --regime crash` - One-regime scenario run
//! - `risk blend [--book <file>] --weights risk_off=0.3,neutral=0.7` - Weighted regime blend
//!
//! Without `--book` the built-in tail-hedge book is used. Reports go to
//! stdout as JSON; logs go to stderr.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use risk_engine::IvAnchor;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::simulate::SimulateOptions;
use config::BookConfig;

/// Book risk engine CLI
#[derive(Parser)]
#[command(name = "risk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List regime presets and their parameters
    Regimes,

    /// Show per-position and aggregate exposures
    Exposures {
        /// Book file (TOML)
        #[arg(short, long)]
        book: Option<PathBuf>,
    },

    /// Run scenarios under one regime
    Simulate {
        /// Book file (TOML)
        #[arg(short, long)]
        book: Option<PathBuf>,

        /// Regime label or alias (e.g. crash, risk_off, vol-crush)
        #[arg(short, long)]
        regime: Option<String>,

        /// Horizon in months
        #[arg(long)]
        horizon: Option<u32>,

        /// Number of scenarios
        #[arg(short = 'n', long)]
        scenarios: Option<usize>,

        /// Base seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Starting IV for the scenario IV walk
        #[arg(long, value_enum)]
        anchor: Option<AnchorArg>,

        /// IV used with `--anchor fixed`
        #[arg(long, default_value_t = 0.20)]
        fixed_iv: f64,
    },

    /// Run a weighted blend of regimes
    Blend {
        /// Book file (TOML)
        #[arg(short, long)]
        book: Option<PathBuf>,

        /// Comma-separated regime=weight pairs
        #[arg(short, long)]
        weights: String,

        /// Horizon in months
        #[arg(long)]
        horizon: Option<u32>,

        /// Total number of scenarios
        #[arg(short = 'n', long)]
        scenarios: Option<usize>,

        /// Base seed
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AnchorArg {
    /// Mean entry IV of the underlying's options
    Entry,
    /// One IV for every underlying
    Fixed,
}

impl AnchorArg {
    fn to_anchor(self, fixed_iv: f64) -> IvAnchor {
        match self {
            AnchorArg::Entry => IvAnchor::EntryIv,
            AnchorArg::Fixed => IvAnchor::Fixed(fixed_iv),
        }
    }
}

impl Commands {
    fn book(&self) -> Option<&Path> {
        match self {
            Commands::Regimes => None,
            Commands::Exposures { book }
            | Commands::Simulate { book, .. }
            | Commands::Blend { book, .. } => book.as_deref(),
        }
    }
}

/// Book settings for the selected command, with environment overrides.
fn book_settings(path: Option<&Path>) -> Result<BookConfig> {
    let book = match path {
        Some(path) => BookConfig::load(path)?,
        None => BookConfig::default(),
    };
    Ok(book.with_env_override())
}

/// `--verbose`, then `RUST_LOG`, then the book's `log_level`.
fn log_filter(verbose: bool, rust_log: Option<&str>, book: Option<&BookConfig>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    if let Some(directives) = rust_log {
        return EnvFilter::new(directives);
    }
    match book {
        Some(book) => EnvFilter::new(&book.simulation.log_level),
        None => EnvFilter::new("info"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = book_settings(cli.command.book());
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose, rust_log.as_deref(), settings.as_ref().ok()))
        .init();

    // An unreadable book stops here, before any command logs at the wrong level.
    settings?;

    debug!(verbose = cli.verbose, "starting");

    match cli.command {
        Commands::Regimes => commands::regimes::run(),
        Commands::Exposures { book } => commands::exposures::run(book.as_deref()),
        Commands::Simulate {
            book,
            regime,
            horizon,
            scenarios,
            seed,
            anchor,
            fixed_iv,
        } => {
            let options = SimulateOptions {
                regime,
                horizon_months: horizon,
                scenarios,
                seed,
                iv_anchor: anchor.map(|a| a.to_anchor(fixed_iv)),
            };
            commands::simulate::run(book.as_deref(), &options)
        }
        Commands::Blend {
            book,
            weights,
            horizon,
            scenarios,
            seed,
        } => commands::blend::run(book.as_deref(), &weights, horizon, scenarios, seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from([
            "risk", "simulate", "--regime", "crash", "-n", "500", "--anchor", "fixed",
            "--fixed-iv", "0.3",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                regime,
                scenarios,
                anchor,
                fixed_iv,
                book,
                ..
            } => {
                assert_eq!(regime.as_deref(), Some("crash"));
                assert_eq!(scenarios, Some(500));
                assert_eq!(anchor.map(|a| a.to_anchor(fixed_iv)), Some(IvAnchor::Fixed(0.3)));
                assert!(book.is_none());
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_parse_blend_requires_weights() {
        assert!(Cli::try_parse_from(["risk", "blend"]).is_err());
        let cli = Cli::try_parse_from([
            "risk", "-v", "blend", "-w", "risk_off=1", "--book", "book.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.command.book(), Some(Path::new("book.toml")));
    }

    #[test]
    fn test_log_filter_precedence() {
        let mut book = BookConfig::default();
        book.simulation.log_level = "warn".to_string();

        assert_eq!(log_filter(true, Some("trace"), Some(&book)).to_string(), "debug");
        assert_eq!(log_filter(false, Some("trace"), Some(&book)).to_string(), "trace");
        assert_eq!(log_filter(false, None, Some(&book)).to_string(), "warn");
        assert_eq!(log_filter(false, None, None).to_string(), "info");
    }

    #[test]
    fn test_unreadable_book_is_an_error() {
        let missing = Path::new("/nonexistent/book.toml");
        assert!(matches!(book_settings(Some(missing)), Err(CliError::FileNotFound(_))));
        assert!(book_settings(None).is_ok());
    }
}
