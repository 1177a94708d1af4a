//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Installs the global `tracing` subscriber.
///
/// Output goes to stderr so that command output on stdout stays parseable.
///
/// # Errors
///
/// Returns [`Error::Logging`] if the filter directive is invalid or a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::Logging(format!("invalid filter '{}': {e}", config.level)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi),
        )
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing::debug!(filter = %config.level, ansi = config.ansi, "logging initialised");
    Ok(())
}
