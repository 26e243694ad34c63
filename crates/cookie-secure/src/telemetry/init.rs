//! Tracing subscriber initialisation.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter from `RUST_LOG`, falling back to `log_level`.
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Initialise the global tracing subscriber with JSON-formatted output.
///
/// Intended for host binaries; libraries embedding this crate should leave
/// subscriber setup to their own entry point.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(log_level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
