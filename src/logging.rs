//! Tracing subscriber setup.
//!
//! Logs go to stderr, or to a file when one is given, so they never
//! interleave with the report on stdout. `RUST_LOG` takes precedence over
//! the `-v`/`-q` flags.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Map the verbosity flags to a default filter directive.
#[must_use]
pub const fn level_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber for the binary.
///
/// # Errors
///
/// Returns an error if `RUST_LOG` cannot be parsed, the log file cannot be
/// opened, or a global subscriber is already installed.
pub fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::new(level_directive(verbose, quiet)),
    };
    let builder = fmt().with_env_filter(filter).with_target(verbose >= 2);

    let installed = if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
    } else {
        builder
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .try_init()
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}

/// Initialize logging for tests; output is captured per test.
pub fn init_test_logging() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbosity() {
        assert_eq!(level_directive(3, true), "error");
    }

    #[test]
    fn verbosity_steps() {
        assert_eq!(level_directive(0, false), "warn");
        assert_eq!(level_directive(1, false), "info");
        assert_eq!(level_directive(2, false), "debug");
        assert_eq!(level_directive(9, false), "trace");
    }
}
