//! Tracing subscriber setup.
//!
//! Logs go to stderr so the narration on stdout stays readable.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber.
///
/// The filter comes from `level` when it parses, else from `RUST_LOG`,
/// else defaults to `warn`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(level: Option<&str>) -> Result<()> {
    let filter = level
        .and_then(|l| EnvFilter::try_new(l).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("installing the log subscriber")
}
