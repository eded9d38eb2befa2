//! Logging setup.
//!
//! Everything goes to stderr. The board owns stdout, and a watched board
//! clears the screen every tick, so log lines must never land there.
//!
//! Verbosity maps onto per-module filter directives rather than one level:
//! the ticker emits a `trace` line per tick, which only `-vv` turns on.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crate target all default directives are rooted at.
const CRATE_TARGET: &str = "tripboard";

/// Target of the board ticker, the only per-tick logger.
const BOARD_TARGET: &str = "tripboard::board";

/// How much the CLI logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Clock override changes and other notable events.
    #[default]
    Normal,
    /// Adds itinerary loading and board start/stop.
    Verbose,
    /// Adds one line per board tick.
    Trace,
}

impl Verbosity {
    /// Pick a verbosity from the `-q` flag and the number of `-v` flags.
    /// `-q` wins over any `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level any tripboard module logs at.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Default `EnvFilter` directives, used when `RUST_LOG` is unset.
    ///
    /// Only the board ticker logs at `trace`, so that level is scoped to it.
    #[must_use]
    pub fn directives(&self) -> String {
        match self {
            Self::Trace => format!(
                "{CRATE_TARGET}={},{BOARD_TARGET}={}",
                Level::DEBUG,
                Level::TRACE
            ),
            other => format!("{CRATE_TARGET}={}", other.to_level_filter()),
        }
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, replaces the
/// directives derived from `verbosity`. Later calls are no-ops.
///
/// ```no_run
/// use tripboard::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init();
}

/// Initialize logging for tests.
///
/// Only warnings and errors are shown, through the test writer.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
