use tracing_subscriber::{EnvFilter, prelude::*};

use crate::core::error::{AvailabilityError, AvailabilityResult};

/// Initialize logging based on environment configuration
///
/// Logs go to stderr without colors; stdout carries the MCP protocol.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
///
/// When `RUST_LOG` is unset, logging stays off unless `debug` is true.
///
/// # Returns
/// - `Ok(())` if logging is successfully initialized or skipped
/// - `Err(AvailabilityError::LoggingInitialization)` if initialization fails
pub fn init_logging(debug: bool) -> AvailabilityResult<()> {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if debug => EnvFilter::new("debug"),
        Err(_) => return Ok(()),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| AvailabilityError::LoggingInitialization(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test environment variable logging setup
    #[test]
    fn test_env_logging_setup() {
        // Without RUST_LOG and without debug this is a no-op
        if std::env::var("RUST_LOG").is_err() {
            let result = init_logging(false);
            assert!(result.is_ok());
        }
    }
}
