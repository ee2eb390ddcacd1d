//! Logging and tracing initialization.
//!
//! Logs go to stderr so that command output on stdout stays machine-readable.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Build the level filter: `RUST_LOG` wins over the configured level.
fn level_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber described by `config`.
///
/// Only the first call installs anything. Returns whether this call did.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let json = config
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text = (!config.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
    });

    tracing_subscriber::registry()
        .with(level_filter(config))
        .with(json)
        .with(text)
        .try_init()
        .is_ok()
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() -> bool {
    init_logging(&LoggingConfig::default())
}
