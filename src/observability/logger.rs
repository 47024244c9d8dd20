//! Logging bootstrap
//!
//! Installs a `tracing` subscriber writing to stderr, either human-readable
//! or one JSON object per line. `RUST_LOG` takes precedence over the
//! configured level.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::{ObservabilityError, ObservabilityResult};

static INSTALLED: OnceLock<Result<(), String>> = OnceLock::new();

/// Initialize the global subscriber.
///
/// Calling this more than once is a no-op; the first configuration wins.
///
/// # Errors
///
/// Returns an error when `level` is not a valid filter directive or when
/// another subscriber was installed outside this function.
pub fn init_logging(level: &str, json_format: bool) -> ObservabilityResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_level(level)?,
    };

    INSTALLED
        .get_or_init(|| install(filter, json_format))
        .clone()
        .map_err(ObservabilityError::new)
}

fn install(filter: EnvFilter, json_format: bool) -> Result<(), String> {
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| format!("failed to install subscriber: {}", e))
}

/// Parse a level or filter directive such as `info` or `reservations=debug`
pub fn parse_level(level: &str) -> ObservabilityResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| ObservabilityError::new(format!("invalid log level '{}': {}", level, e)))
}
