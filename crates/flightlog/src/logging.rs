//! Diagnostics on stderr.
//!
//! Stdout carries command output (tables, JSON, the chart), so every log line
//! goes to stderr. The default level is WARN: a skipped line in the flights
//! file or a save that did not reach disk is reported without `-v`.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How chatty the `flightlog` binary is, from `-q` to `-vv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and above, so skipped lines and failed saves still show.
    #[default]
    Normal,
    /// Adds load/save paths and record counts.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// The most detailed level that gets through.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

fn default_directive(verbosity: Verbosity) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), verbosity.to_level_filter())
}

/// Install the stderr subscriber, filtered to this crate at `verbosity`.
///
/// `RUST_LOG`, when set, replaces the filter entirely. Calling this twice is
/// harmless; the second call does nothing.
///
/// # Examples
///
/// ```no_run
/// use flightlog::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    let _ = subscriber.try_init();
}

/// Initialize logging for tests.
///
/// Only warnings and errors are shown, through the test writer so they are
/// captured per test.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
